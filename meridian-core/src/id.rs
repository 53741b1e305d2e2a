//! Composite resource IDs
//!
//! Sub-resources are addressed through a single string that encodes the
//! parent chain with `/` separators: `pipeline_id/definition_id`,
//! `pipeline_id/trigger_id/property_name`, `template_id/version`, and so on.
//! This module joins and splits those strings, rejecting malformed input.

/// Error raised when a composite ID string does not match the expected shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    /// Wrong number of `/`-separated segments
    SegmentCount {
        input: String,
        expected: usize,
        found: usize,
    },
    /// A segment was empty
    EmptySegment { input: String },
}

impl std::fmt::Display for IdError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdError::SegmentCount {
                input,
                expected,
                found,
            } => write!(
                f,
                "composite ID `{}` has {} segment(s), expected {}",
                input, found, expected
            ),
            IdError::EmptySegment { input } => {
                write!(f, "composite ID `{}` contains an empty segment", input)
            }
        }
    }
}

impl std::error::Error for IdError {}

/// Joins ID segments into a composite ID string
///
/// Segments must be non-empty and must not contain `/`; IDs issued by the
/// services never do.
pub fn join(segments: &[&str]) -> String {
    segments.join("/")
}

/// Splits a composite ID into exactly `expected` segments
pub fn split(id: &str, expected: usize) -> Result<Vec<String>, IdError> {
    let segments: Vec<&str> = id.split('/').collect();
    if segments.len() != expected {
        return Err(IdError::SegmentCount {
            input: id.to_string(),
            expected,
            found: segments.len(),
        });
    }
    if segments.iter().any(|s| s.is_empty()) {
        return Err(IdError::EmptySegment {
            input: id.to_string(),
        });
    }
    Ok(segments.into_iter().map(str::to_string).collect())
}

/// Splits a two-segment composite ID, e.g. `pipeline_id/definition_id`
pub fn split2(id: &str) -> Result<(String, String), IdError> {
    let mut parts = split(id, 2)?.into_iter();
    Ok((parts.next().unwrap(), parts.next().unwrap()))
}

/// Splits a three-segment composite ID, e.g.
/// `pipeline_id/trigger_id/property_name`
pub fn split3(id: &str) -> Result<(String, String, String), IdError> {
    let mut parts = split(id, 3)?.into_iter();
    Ok((
        parts.next().unwrap(),
        parts.next().unwrap(),
        parts.next().unwrap(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_and_split2() {
        let id = join(&["94619026-912b-4d92-8f51-6c74f0692d90", "listener-1"]);
        assert_eq!(id, "94619026-912b-4d92-8f51-6c74f0692d90/listener-1");

        let (pipeline, trigger) = split2(&id).unwrap();
        assert_eq!(pipeline, "94619026-912b-4d92-8f51-6c74f0692d90");
        assert_eq!(trigger, "listener-1");
    }

    #[test]
    fn test_split3() {
        let (pipeline, trigger, name) = split3("p1/t1/API_KEY").unwrap();
        assert_eq!((pipeline.as_str(), trigger.as_str(), name.as_str()), ("p1", "t1", "API_KEY"));
    }

    #[test]
    fn test_wrong_segment_count() {
        let err = split2("only-one-segment").unwrap_err();
        assert_eq!(
            err,
            IdError::SegmentCount {
                input: "only-one-segment".to_string(),
                expected: 2,
                found: 1,
            }
        );

        assert!(split2("a/b/c").is_err());
    }

    #[test]
    fn test_empty_segment_rejected() {
        let err = split2("a/").unwrap_err();
        assert!(matches!(err, IdError::EmptySegment { .. }));
        assert!(split3("a//c").is_err());
    }
}
