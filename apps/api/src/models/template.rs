use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorScheme {
    pub name: String,
    pub primary: String,
    pub secondary: String,
    pub accent: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontOption {
    pub name: String,
    pub family: String,
    /// "sans-serif", "serif", ...
    #[serde(rename = "type")]
    pub font_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub features: Vec<String>,
    pub color_schemes: Vec<ColorScheme>,
    pub font_options: Vec<FontOption>,
}

impl Template {
    /// First color scheme and first font, if the template offers both.
    pub fn default_customization(&self) -> Option<Customization> {
        Some(Customization {
            color_scheme: self.color_schemes.first()?.clone(),
            font: self.font_options.first()?.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customization {
    pub color_scheme: ColorScheme,
    pub font: FontOption,
}
