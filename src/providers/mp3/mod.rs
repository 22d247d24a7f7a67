//! MP3 audio. Bytes come from a swappable [`Mp3Generator`].

pub mod http_tts;
pub mod silent;

pub use http_tts::HttpTtsMp3Generator;
pub use silent::SilentMp3Generator;

use crate::core::fake::Fake;
use crate::core::template::{TextContent, DEFAULT_AUDIO_MAX_NB_CHARS};
use crate::domain::model::{FileData, Rendered};
use crate::domain::ports::{FileProvider, Mp3Generator};
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

fn default_generator() -> Arc<dyn Mp3Generator> {
    Arc::new(SilentMp3Generator::default())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Mp3File {
    #[serde(flatten)]
    pub text: TextContent,
    #[serde(skip, default = "default_generator")]
    pub generator: Arc<dyn Mp3Generator>,
}

impl Default for Mp3File {
    fn default() -> Self {
        Self {
            text: TextContent::default(),
            generator: default_generator(),
        }
    }
}

impl Mp3File {
    pub fn with_generator(generator: impl Mp3Generator + 'static) -> Self {
        Self {
            generator: Arc::new(generator),
            ..Self::default()
        }
    }
}

impl FileProvider for Mp3File {
    fn name(&self) -> &'static str {
        "mp3_file"
    }

    fn render(&self, fake: &mut Fake) -> Result<Rendered> {
        let content = self.text.generate(fake, DEFAULT_AUDIO_MAX_NB_CHARS)?;
        let bytes = self.generator.generate(&content)?;
        tracing::debug!("{} produced {} bytes", self.generator.name(), bytes.len());

        let mut data = FileData::with_content(content);
        data.insert_extra("generator", self.generator.name());
        Ok(Rendered::new(bytes, "mp3", data))
    }
}
