use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of video a script is written for
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum TipoRoteiro {
    /// Regular video, roughly 4-7 minutes
    #[default]
    #[serde(rename = "Video")]
    Longo,
    /// YouTube short, up to 60 seconds
    #[serde(rename = "Short")]
    Short,
}

impl TipoRoteiro {
    pub fn as_str(&self) -> &'static str {
        match self {
            TipoRoteiro::Longo => "Video",
            TipoRoteiro::Short => "Short",
        }
    }

    /// Target duration shown to the model
    pub fn duracao_alvo(&self) -> &'static str {
        match self {
            TipoRoteiro::Longo => "4-7 minutos",
            TipoRoteiro::Short => "≤60 segundos",
        }
    }
}

impl fmt::Display for TipoRoteiro {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TipoRoteiro {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "video" | "longo" => Ok(TipoRoteiro::Longo),
            "short" => Ok(TipoRoteiro::Short),
            other => Err(anyhow::anyhow!("Unknown script type: {}", other)),
        }
    }
}

fn now() -> DateTime<Local> {
    Local::now()
}

/// A generated biblical script
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoteiroBiblico {
    /// Central theme of the reflection
    pub tema: String,

    #[serde(default = "now")]
    pub data_criacao: DateTime<Local>,

    /// Full script text
    pub roteiro: String,

    /// Citations actually used in the script
    pub versiculos_utilizados: Vec<String>,

    /// e.g. "3-6 minutos" or "≤60 segundos"
    pub duracao_estimada: String,

    #[serde(default)]
    pub tipo: TipoRoteiro,

    /// References suggested to the generator
    #[serde(default)]
    pub referencias: Vec<String>,

    /// YouTube community post announcing the video
    #[serde(default)]
    pub postagem_comunidade: String,
}

/// YouTube metadata derived from a script
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DetailVideoYouTube {
    pub titulo: String,
    pub descricao: String,
    pub tags: Vec<String>,
    pub hashtags: Vec<String>,
    /// Prompt for the thumbnail image generator
    pub thumbnail_prompt: String,
}
