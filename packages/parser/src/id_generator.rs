use crc32fast::Hasher;

/// Paragraph id source for one document.
///
/// Ids look like `<crc32 of path>-<n>`. They live only in memory: the same
/// file parsed twice gets the same ids, and paragraphs created later continue
/// the sequence.
#[derive(Debug, Clone)]
pub struct IDGenerator {
    seed: u32,
    count: u32,
}

impl IDGenerator {
    pub fn new(path: &str) -> Self {
        let mut hasher = Hasher::new();
        hasher.update(path.as_bytes());
        Self {
            seed: hasher.finalize(),
            count: 0,
        }
    }

    pub fn new_id(&mut self) -> String {
        self.count += 1;
        format!("{:08x}-{}", self.seed, self.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_path_same_ids() {
        let mut a = IDGenerator::new("notes/draft.md");
        let mut b = IDGenerator::new("notes/draft.md");
        assert_eq!(a.new_id(), b.new_id());

        let mut other = IDGenerator::new("notes/other.md");
        assert_ne!(IDGenerator::new("notes/draft.md").new_id(), other.new_id());
    }

    #[test]
    fn test_clone_continues_sequence() {
        let mut ids = IDGenerator::new("draft.md");
        let first = ids.new_id();

        let mut copy = ids.clone();
        let second = copy.new_id();
        assert_ne!(first, second);
        assert!(second.ends_with("-2"));
        assert_eq!(first.split('-').next(), second.split('-').next());
    }
}
