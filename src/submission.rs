use chrono::{DateTime, Local};

/// The justification text block handed to the image canvas, plus the
/// download filename it should be saved under. Composing the text is pure
/// string/time work; rasterizing it is the canvas collaborator's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub body: String,
    pub file_name: String,
}

/// Compose the submission block for `reason`, stamped with the current
/// local time.
pub fn compose(reason: &str) -> Submission {
    compose_at(reason, Local::now())
}

pub fn compose_at(reason: &str, at: DateTime<Local>) -> Submission {
    let timestamp = at.format("%Y%m%d_%H%M%S").to_string();
    Submission {
        body: format!("[구매 이유]\n{reason}\n\n제출 시각: {timestamp}"),
        file_name: format!("구매이유_{timestamp}.png"),
    }
}
