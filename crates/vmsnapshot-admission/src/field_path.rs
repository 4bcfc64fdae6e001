use std::fmt;

/// Path to a field of the object under review, rendered the way the
/// Kubernetes API server reports it inside of a `StatusCause`
/// (e.g. `spec.source.virtualMachineName` or `spec.volumes[0].name`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldPath {
    segments: Vec<Segment>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment {
    Field(String),
    Index(usize),
}

impl FieldPath {
    pub fn new(root: &str) -> Self {
        FieldPath {
            segments: vec![Segment::Field(root.to_owned())],
        }
    }

    pub fn child(&self, name: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(Segment::Field(name.to_owned()));
        FieldPath { segments }
    }

    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(Segment::Index(index));
        FieldPath { segments }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Field(name) if position == 0 => write!(f, "{name}")?,
                Segment::Field(name) => write!(f, ".{name}")?,
                Segment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_fields() {
        let source = FieldPath::new("spec").child("source");
        assert_eq!(source.to_string(), "spec.source");
        assert_eq!(
            source.child("virtualMachineName").to_string(),
            "spec.source.virtualMachineName"
        );
    }

    #[test]
    fn child_does_not_modify_parent() {
        let spec = FieldPath::new("spec");
        let _ = spec.child("source");
        assert_eq!(spec.to_string(), "spec");
    }

    #[test]
    fn indexed_fields() {
        let path = FieldPath::new("spec").child("volumes").index(2).child("name");
        assert_eq!(path.to_string(), "spec.volumes[2].name");
    }
}
