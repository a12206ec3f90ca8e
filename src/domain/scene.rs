//! Recognized background scenes and their canonical prompts
//!
//! The site requests one generated backdrop per scene. Scene identifiers
//! double as cache keys, so lookups are exact: no trimming, no case folding.

/// A site scene with its canonical image-generation prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scene {
    pub id: &'static str,
    pub prompt: &'static str,
}

/// Every scene the site shell knows how to render
pub const SCENES: &[Scene] = &[
    Scene {
        id: "entry",
        prompt: "Whimsical Alice in Wonderland rabbit hole entrance framed by an ornate Victorian mirror, \
                 roses and pocket watches drifting in soft dreamy light, pastel watercolor style, no text",
    },
    Scene {
        id: "services",
        prompt: "Elegant Wonderland pet grooming parlor with gilded clawfoot tubs, teacup-shaped shampoo \
                 bottles and playing-card bunting, warm afternoon light, pastel watercolor style, no text",
    },
    Scene {
        id: "gallery",
        prompt: "Gallery wall of ornate gold frames showing freshly groomed dogs and cats in tiny top hats, \
                 Wonderland forest wallpaper behind, pastel watercolor style, no text",
    },
    Scene {
        id: "contact",
        prompt: "Cozy Wonderland writing desk with quill, wax-sealed letters and a grinning cat curled on a \
                 cushion, candlelit, pastel watercolor style, no text",
    },
    Scene {
        id: "teaParty",
        prompt: "Mad Hatter tea party table set for pampered pets, tiered trays of dog biscuits, mismatched \
                 teapots pouring bubbles, dappled garden light, pastel watercolor style, no text",
    },
    Scene {
        id: "garden",
        prompt: "Talking flower garden with a manicured poodle posing among giant roses and croquet arches, \
                 butterflies shaped like bow ties, pastel watercolor style, no text",
    },
];

/// Canonical prompt for a recognized scene; `None` for unknown identifiers
pub fn prompt_for(id: &str) -> Option<&'static str> {
    SCENES.iter().find(|scene| scene.id == id).map(|scene| scene.prompt)
}

/// All recognized scene identifiers, in declaration order
pub fn scene_ids() -> Vec<String> {
    SCENES.iter().map(|scene| scene.id.to_string()).collect()
}
