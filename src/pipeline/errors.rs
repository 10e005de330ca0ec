use thiserror::Error;

use crate::normalizer::EnvelopeStatus;
use crate::resolver::ResolveError;

pub const TRANSPORT_FAILURE_PREFIX: &str = "发生错误! 请重试; ";
pub const RESOLUTION_FAILURE_MESSAGE: &str = "解析失败! 该链接或许不支持";
pub const MISSING_VIDEO_URL_MESSAGE: &str = "无法获取视频链接，请稍后重试";

/// Ways a single message's pipeline can stop. None of them affect other
/// messages.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("resolution request failed: {0}")]
    Transport(#[from] ResolveError),

    #[error("resolution failed with status {status}")]
    ResolutionFailure { status: EnvelopeStatus },

    #[error("video post has neither a download nor a play url")]
    MissingVideoUrl,
}

impl PipelineError {
    /// Text reported back to the user who sent the link.
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(err) => format!("{TRANSPORT_FAILURE_PREFIX}{err}"),
            Self::ResolutionFailure { .. } => RESOLUTION_FAILURE_MESSAGE.to_string(),
            Self::MissingVideoUrl => MISSING_VIDEO_URL_MESSAGE.to_string(),
        }
    }
}
