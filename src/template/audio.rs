use std::path::{Path, PathBuf};

use futures::future::{BoxFuture, FutureExt};
use serde_json::Value;
use tracing::info;

use crate::error::{Error, Result};
use crate::network::Session;
use crate::request::{
    execute_pooled, ClientMode, FilePart, FormPart, RequestBody, RequestParams, TemplateConfig,
};
use crate::template::{RequestArgs, RequestTemplate};

pub const AUDIO_FIELD: &str = "audio";
pub const TEXT_FIELD: &str = "text";

const DEFAULT_AUTH_HEADER: (&str, &str) = ("auth-key", "blahblah");

/// One `.wav` file and the transcript sitting next to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioArgs {
    pub audio_path: PathBuf,
    pub txt_path: PathBuf,
}

/// Uploads every `<stem>.wav` in a directory together with the contents of
/// `<stem>.txt` as a multipart form, carrying a static auth header.
#[derive(Debug, Clone)]
pub struct AudioUploadTemplate {
    config: TemplateConfig,
    dir: PathBuf,
    headers: Vec<(String, String)>,
}

impl AudioUploadTemplate {
    pub fn new(base_url: &str, method: &str, dir: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self::with_config(TemplateConfig::new(base_url, method, 0)?, dir))
    }

    pub fn with_config(config: TemplateConfig, dir: impl Into<PathBuf>) -> Self {
        Self {
            config,
            dir: dir.into(),
            headers: vec![(DEFAULT_AUTH_HEADER.0.to_string(), DEFAULT_AUTH_HEADER.1.to_string())],
        }
    }

    /// Sets a header, replacing any existing one with the same name.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

pub(crate) fn read_transcript(path: &Path) -> Result<String> {
    let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    Ok(text.trim().to_string())
}

/// The form body for one upload, shaped for `mode`'s client.
pub fn upload_body(audio_path: &Path, text: String, mode: ClientMode) -> Result<RequestBody> {
    Ok(match mode {
        ClientMode::Pooled => RequestBody::Multipart(vec![
            FormPart::File(FilePart::open(AUDIO_FIELD, audio_path)?),
            FormPart::Text { name: TEXT_FIELD.to_string(), value: text },
        ]),
        ClientMode::Sync => RequestBody::FilesAndData {
            files: vec![FilePart::read(AUDIO_FIELD, audio_path)?],
            data: vec![(TEXT_FIELD.to_string(), text)],
        },
    })
}

fn pair_transcript(audio_path: PathBuf) -> Result<AudioArgs> {
    let txt_path = audio_path.with_extension("txt");
    if !txt_path.is_file() {
        return Err(Error::MissingTranscript { audio: audio_path });
    }
    Ok(AudioArgs { audio_path, txt_path })
}

impl RequestTemplate for AudioUploadTemplate {
    type Args = AudioArgs;

    fn config(&self) -> &TemplateConfig {
        &self.config
    }

    fn build_params(&self, args: &AudioArgs, mode: ClientMode) -> Result<RequestParams> {
        let text = read_transcript(&args.txt_path)?;
        let body = upload_body(&args.audio_path, text, mode)?;
        Ok(RequestParams::new(self.config.base_url.as_str())
            .with_headers(&self.headers)
            .with_body(body))
    }

    fn send_request<'a>(
        &'a self,
        session: &'a Session,
        args: AudioArgs,
    ) -> BoxFuture<'a, Result<Value>> {
        async move {
            let params = self.build_params(&args, ClientMode::Pooled)?;
            let response = execute_pooled(session, self.config.method, params).await?;
            response.warn_unless_ok();
            info!(audio = %args.audio_path.display(), body = %response.body, "Upload response");
            Ok(response.body)
        }
        .boxed()
    }

    /// Every `*.wav` directly inside the directory, sorted by path, dotfiles
    /// excluded. A wav without its transcript yields
    /// [`Error::MissingTranscript`].
    ///
    /// The transcript keeps every dot of the audio name but the last:
    /// `take.1.wav` pairs with `take.1.txt`.
    fn request_args(&self) -> Result<RequestArgs<'_, AudioArgs>> {
        let entries = std::fs::read_dir(&self.dir).map_err(|e| Error::io(&self.dir, e))?;

        let mut audio = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| Error::io(&self.dir, e))?.path();
            let hidden = path
                .file_name()
                .map_or(true, |name| name.to_string_lossy().starts_with('.'));
            if !hidden && path.is_file() && path.extension().map_or(false, |ext| ext == "wav") {
                audio.push(path);
            }
        }
        audio.sort();

        Ok(Box::new(audio.into_iter().map(pair_transcript)))
    }
}
