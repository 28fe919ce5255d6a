use super::{classify_content, classify_sensitivity, ContentType, SensitiveDataType};

/// Both independent classifications of one text payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub content_type: ContentType,
    pub sensitive_type: Option<SensitiveDataType>,
}

pub fn classify(text: &str) -> Classification {
    Classification {
        content_type: classify_content(text),
        sensitive_type: classify_sensitivity(text),
    }
}
