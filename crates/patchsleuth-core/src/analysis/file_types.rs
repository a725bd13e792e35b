/// File type classification based on file extensions.
///
/// Maps an extension to the semantic label the in-game checker groups
/// files by. The table is closed: anything unlisted is [`FileType::Other`],
/// and a file with no extension at all is [`FileType::NoExt`].
use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic type labels recorded in the manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileType {
    Json,
    Javascript,
    Image,
    Language,
    Text,
    Properties,
    Toml,
    Yaml,
    Xml,
    Nbt,
    Mcmeta,
    Audio,
    Other,
    NoExt,
}

impl FileType {
    /// Label as written in the manifest.
    pub fn label(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Javascript => "javascript",
            Self::Image => "image",
            Self::Language => "language",
            Self::Text => "text",
            Self::Properties => "properties",
            Self::Toml => "toml",
            Self::Yaml => "yaml",
            Self::Xml => "xml",
            Self::Nbt => "nbt",
            Self::Mcmeta => "mcmeta",
            Self::Audio => "audio",
            Self::Other => "other",
            Self::NoExt => "no_ext",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Extensions longer than this cannot be in the table.
const MAX_KNOWN_EXT_LEN: usize = 16;

/// Categorise a file extension (without the leading dot).
///
/// Total by construction: the empty string is [`FileType::NoExt`] and every
/// other unlisted value falls through to [`FileType::Other`]. Matching is
/// case-insensitive; the extension is lowercased into a stack buffer so the
/// lookup never allocates.
pub fn categorise_extension(ext: &str) -> FileType {
    let bytes = ext.as_bytes();
    if bytes.is_empty() {
        return FileType::NoExt;
    }
    if bytes.len() > MAX_KNOWN_EXT_LEN {
        return FileType::Other;
    }

    let mut lower = [0u8; MAX_KNOWN_EXT_LEN];
    for (dest, &src) in lower.iter_mut().zip(bytes.iter()) {
        *dest = src.to_ascii_lowercase();
    }
    let lower_str = match std::str::from_utf8(&lower[..bytes.len()]) {
        Ok(s) => s,
        Err(_) => return FileType::Other,
    };

    match lower_str {
        "json" => FileType::Json,
        "js" => FileType::Javascript,
        "png" | "jpg" | "jpeg" | "gif" => FileType::Image,
        "lang" => FileType::Language,
        "txt" => FileType::Text,
        "properties" => FileType::Properties,
        "toml" => FileType::Toml,
        "yml" | "yaml" => FileType::Yaml,
        "xml" => FileType::Xml,
        "snbt" | "nbt" => FileType::Nbt,
        "mcmeta" => FileType::Mcmeta,
        "ogg" | "wav" | "mp3" => FileType::Audio,
        _ => FileType::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categorise_known_image_extensions() {
        for ext in &["png", "jpg", "jpeg", "gif"] {
            assert_eq!(
                categorise_extension(ext),
                FileType::Image,
                "expected image for .{ext}"
            );
        }
    }

    #[test]
    fn categorise_known_audio_extensions() {
        for ext in &["ogg", "wav", "mp3"] {
            assert_eq!(categorise_extension(ext), FileType::Audio, "expected audio for .{ext}");
        }
    }

    #[test]
    fn categorise_structured_text_extensions() {
        assert_eq!(categorise_extension("json"), FileType::Json);
        assert_eq!(categorise_extension("js"), FileType::Javascript);
        assert_eq!(categorise_extension("lang"), FileType::Language);
        assert_eq!(categorise_extension("properties"), FileType::Properties);
        assert_eq!(categorise_extension("yml"), FileType::Yaml);
        assert_eq!(categorise_extension("yaml"), FileType::Yaml);
        assert_eq!(categorise_extension("snbt"), FileType::Nbt);
        assert_eq!(categorise_extension("mcmeta"), FileType::Mcmeta);
    }

    #[test]
    fn empty_extension_is_no_ext_not_other() {
        assert_eq!(categorise_extension(""), FileType::NoExt);
        assert_ne!(categorise_extension(""), FileType::Other);
    }

    #[test]
    fn categorise_unknown_extension_returns_other() {
        assert_eq!(categorise_extension("xyz"), FileType::Other);
        assert_eq!(categorise_extension("a-very-long-extension-name"), FileType::Other);
        assert_eq!(categorise_extension("ß"), FileType::Other);
    }

    /// Extension matching must be case-insensitive so "PNG" == "png".
    #[test]
    fn categorise_case_insensitive() {
        assert_eq!(categorise_extension("PNG"), FileType::Image);
        assert_eq!(categorise_extension("Json"), FileType::Json);
        assert_eq!(categorise_extension("OGG"), FileType::Audio);
    }

    #[test]
    fn labels_match_serialized_form() {
        for ty in [FileType::NoExt, FileType::Javascript, FileType::Mcmeta, FileType::Other] {
            let json = serde_json::to_string(&ty).unwrap();
            assert_eq!(json, format!("\"{}\"", ty.label()));
        }
    }
}
