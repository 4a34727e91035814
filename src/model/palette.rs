use serde::{Deserialize, Serialize};

/// An ordered color ramp sampled by the renderer. Each entry is RGBA with
/// channels in [0, 1]. Palette mutation replaces the whole ramp, never
/// merges into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub name: String,
    pub colors: Vec<[f64; 4]>,
}

impl Palette {
    pub fn new(name: impl Into<String>, colors: Vec<[f64; 4]>) -> Self {
        Self {
            name: name.into(),
            colors,
        }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl Default for Palette {
    /// Plain grayscale ramp for freshly constructed genomes.
    fn default() -> Self {
        let colors = (0..10)
            .map(|i| {
                let v = i as f64 / 9.0;
                [v, v, v, 1.0]
            })
            .collect();
        Self::new("Default", colors)
    }
}
