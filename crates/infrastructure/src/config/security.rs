//! Security header configuration
//!
//! The content-security-policy allow-lists are static configuration, not
//! runtime logic: the defaults enumerate the origins the bundled frontend
//! actually loads from (map tiles, CDN assets, hosted images).

use serde::{Deserialize, Serialize};

/// Content-security-policy origin allow-lists
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Additional `script-src` origins
    #[serde(default = "default_script_src")]
    pub script_src: Vec<String>,

    /// Additional `style-src` origins
    #[serde(default = "default_style_src")]
    pub style_src: Vec<String>,

    /// Additional `img-src` origins
    #[serde(default = "default_img_src")]
    pub img_src: Vec<String>,

    /// Additional `connect-src` origins
    #[serde(default = "default_connect_src")]
    pub connect_src: Vec<String>,

    /// Additional `font-src` origins
    #[serde(default = "default_font_src")]
    pub font_src: Vec<String>,
}

fn default_script_src() -> Vec<String> {
    vec![
        "https://cdn.maptiler.com".to_string(),
        "https://cdn.jsdelivr.net".to_string(),
    ]
}

fn default_style_src() -> Vec<String> {
    vec![
        "https://cdn.maptiler.com".to_string(),
        "https://cdn.jsdelivr.net".to_string(),
    ]
}

fn default_img_src() -> Vec<String> {
    vec![
        "https://res.cloudinary.com".to_string(),
        "https://api.maptiler.com".to_string(),
        "https://*.maptiler.com".to_string(),
        "https://images.unsplash.com".to_string(),
        "https://*.unsplash.com".to_string(),
    ]
}

fn default_connect_src() -> Vec<String> {
    vec![
        "https://api.maptiler.com".to_string(),
        "https://cdn.jsdelivr.net".to_string(),
    ]
}

fn default_font_src() -> Vec<String> {
    vec!["https://cdn.jsdelivr.net".to_string()]
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            script_src: default_script_src(),
            style_src: default_style_src(),
            img_src: default_img_src(),
            connect_src: default_connect_src(),
            font_src: default_font_src(),
        }
    }
}
