//! Image generator implementations

mod openai_images;

pub use openai_images::OpenAiImages;
