use crate::api::Oracle;
use crate::error::{Error, Result};

/// Build the instruction sent to the model: the file name plus the
/// candidates as a JSON array.
pub fn build_prompt(file_name: &str, candidates: &[String]) -> Result<String> {
    let candidate_json = serde_json::to_string(candidates)
        .map_err(|e| Error::ModelInvocation(format!("Failed to encode candidates: {e}")))?;
    Ok(format!(
        "I have a video file named: \"{file_name}\".\n\
         Below is the list of candidate storage paths (in JSON format):\n\
         {candidate_json}\n\n\
         Please select the most suitable storage path from the above candidate list for this file, \
         and return only one exact matching string, without any additional explanation. \
         If no suitable option is found, please return \"None\".\n"
    ))
}

/// Ask the oracle where `file_name` belongs. `Ok(None)` means no suitable
/// destination; any returned path is a member of `candidates`.
pub fn select_destination(
    oracle: &dyn Oracle,
    file_name: &str,
    candidates: &[String],
) -> Result<Option<String>> {
    let prompt = build_prompt(file_name, candidates)?;
    tracing::debug!("Prompt sent to model:\n{}", prompt);

    let reply = oracle.ask(&prompt)?;
    tracing::debug!("Raw model reply: {}", reply);

    match interpret_reply(&reply, candidates) {
        Ok(choice) => Ok(choice),
        Err(mismatch @ Error::ModelOutputMismatch(_)) => {
            tracing::warn!("{}", mismatch);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Validate a raw reply against the candidates. A non-candidate answer is
/// reported as `ModelOutputMismatch`.
pub fn interpret_reply(reply: &str, candidates: &[String]) -> Result<Option<String>> {
    let answer = strip_quotes(reply.trim()).trim();
    if answer.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    if candidates.iter().any(|c| c == answer) {
        Ok(Some(answer.to_string()))
    } else {
        Err(Error::ModelOutputMismatch(answer.to_string()))
    }
}

/// Remove one pair of matching enclosing quotes.
fn strip_quotes(s: &str) -> &str {
    for quote in ['"', '\'', '`'] {
        if s.len() >= 2 && s.starts_with(quote) && s.ends_with(quote) {
            return &s[1..s.len() - 1];
        }
    }
    s
}
