use crate::error::{GlobeError, Result};
use fnv::FnvHashMap;

/// Every image the globe draws with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextureName {
    Aperture,
    LightColumn,
    Label,
    Glow,
    Earth,
    Gradient,
    RedCircle,
    Aircraft,
}

impl TextureName {
    pub const ALL: [TextureName; 8] = [
        TextureName::Gradient,
        TextureName::RedCircle,
        TextureName::Label,
        TextureName::Aperture,
        TextureName::Glow,
        TextureName::LightColumn,
        TextureName::Aircraft,
        TextureName::Earth,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TextureName::Aperture => "aperture",
            TextureName::LightColumn => "light_column",
            TextureName::Label => "label",
            TextureName::Glow => "glow",
            TextureName::Earth => "earth",
            TextureName::Gradient => "gradient",
            TextureName::RedCircle => "redCircle",
            TextureName::Aircraft => "aircraft",
        }
    }

    /// File name under the asset directory.
    pub fn file_name(self) -> String {
        match self {
            TextureName::Earth => format!("{}.jpg", self.as_str()),
            _ => format!("{}.png", self.as_str()),
        }
    }
}

/// Loaded textures keyed by name, plus the names that failed to load.
pub struct TextureRegistry<T> {
    textures: FnvHashMap<TextureName, T>,
    load_errors: Vec<TextureName>,
}

impl<T> Default for TextureRegistry<T> {
    fn default() -> Self {
        Self {
            textures: FnvHashMap::default(),
            load_errors: Vec::new(),
        }
    }
}

impl<T> TextureRegistry<T> {
    pub fn insert(&mut self, name: TextureName, texture: T) {
        self.textures.insert(name, texture);
    }

    pub fn get(&self, name: TextureName) -> Result<&T> {
        self.textures
            .get(&name)
            .ok_or_else(|| GlobeError::AssetUnavailable {
                name: name.as_str().to_string(),
            })
    }

    pub fn record_failure(&mut self, name: TextureName) {
        log::error!("[assets] failed to load texture: {}", name.file_name());
        self.load_errors.push(name);
    }

    pub fn has_load_errors(&self) -> bool {
        !self.load_errors.is_empty()
    }

    pub fn load_errors(&self) -> &[TextureName] {
        &self.load_errors
    }

    /// Names not (yet) in the registry.
    pub fn missing(&self) -> Vec<TextureName> {
        TextureName::ALL
            .iter()
            .copied()
            .filter(|n| !self.textures.contains_key(n))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Drop every texture, handing each to `release` first.
    pub fn destroy(&mut self, mut release: impl FnMut(TextureName, T)) {
        for (name, tex) in self.textures.drain() {
            release(name, tex);
        }
    }
}
