//! Signature metadata extraction.
//!
//! Turns the diagnostic text `git verify-commit` relays from gpg into a
//! [`SignatureRecord`]. This is the only place that knows the tool's wording:
//!
//! ```text
//! gpg: Signature made Tue 10 Oct 2023 09:15:02 AM UTC
//! gpg:                using RSA key 4AEE18F83AFDEB23
//! gpg: Good signature from "Alice Example <alice@example.com>" [ultimate]
//! ```

use regex::Regex;
use std::sync::LazyLock;

use crate::domain::errors::{ExtractionError, SignatureField};
use crate::domain::models::{CommitId, SignatureClass, SignatureRecord, SignedCommit};
use crate::domain::ports::VerificationOutput;

// Older gpg prints the key clause on the timestamp line:
// `Signature made <date> using RSA key ID 4AEE18F8`.
static SIGNED_AT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)Signature made (.+?)(?:[ \t]+using[ \t].*)?$").expect("signed-at pattern")
});

static KEY_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"using [A-Za-z0-9]+ key (?:ID\s+)?(\S+)").expect("key pattern")
});

static GOOD_SIGNATURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"Good signature from "([^"]*)""#).expect("good signature pattern")
});

static SIGNER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.*?)\s*<([^<>\s]+@[^<>\s]+)>\s*$").expect("signer pattern")
});

// The annotation right after the quoted user id. Lowercase words only, so
// status prefixes like `[GNUPG:]` never match.
static SIGNATURE_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"Good signature from "[^"]*"[ \t]*\[([a-z][a-z ]*)\]"#).expect("class pattern")
});

/// Read one commit's verification result.
///
/// A failed verification is `Unsigned` whatever the text says. A successful
/// one must yield every field, otherwise the output is malformed and an
/// [`ExtractionError`] names the first missing field.
pub fn extract_signature(
    commit: &CommitId,
    output: &VerificationOutput,
) -> Result<SignatureRecord, ExtractionError> {
    if !output.success {
        return Ok(SignatureRecord::Unsigned);
    }

    let text = output.diagnostics.as_str();

    let signed_at = capture(&SIGNED_AT, text).ok_or(ExtractionError::missing(SignatureField::SignedAt))?;
    let key_id = capture(&KEY_ID, text).ok_or(ExtractionError::missing(SignatureField::KeyId))?;
    let signer = capture(&GOOD_SIGNATURE, text)
        .ok_or(ExtractionError::missing(SignatureField::SignerName))?;
    let (signer_name, signer_email) = split_signer(signer)?;
    let signature_class = capture(&SIGNATURE_CLASS, text)
        .map(SignatureClass::parse)
        .ok_or(ExtractionError::missing(SignatureField::SignatureClass))?;

    Ok(SignatureRecord::Signed(SignedCommit {
        commit_id: commit.clone(),
        signed_at: signed_at.to_string(),
        key_id: key_id.to_string(),
        signer_name,
        signer_email,
        signature_class,
    }))
}

fn capture<'t>(pattern: &Regex, text: &'t str) -> Option<&'t str> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|value| !value.is_empty())
}

/// Split `Alice Example <alice@example.com>` into name and email.
fn split_signer(signer: &str) -> Result<(String, String), ExtractionError> {
    let caps = SIGNER
        .captures(signer)
        .ok_or(ExtractionError::missing(SignatureField::SignerEmail))?;

    let name = caps[1].trim();
    if name.is_empty() {
        return Err(ExtractionError::missing(SignatureField::SignerName));
    }

    Ok((name.to_string(), caps[2].to_string()))
}
