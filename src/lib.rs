//! Random access to the lines of large files. The line index is built lazily while the file is
//! scanned forward, so lines which were read once can later be read again without scanning.

/// Helper around std::io::BufReader which tracks its position
mod bufreader;
/// Pluggable conversion of line bytes into text
pub mod decoder;
pub mod error;
/// Opening stores from paths
pub mod file;
/// The lazily built index of lines
pub mod index;
/// Reading ranges of lines through the index
pub mod store;
/// Stores over in-memory text
pub mod string;

pub use decoder::{Decoder, Latin1, Utf8, Utf8Lossy};
pub use error::Error;
pub use file::File;
pub use index::{RecordIndex, RecordInfo};
pub use store::{BlankLines, IndexedLineStore, StoreOptions, TrailingLine};
pub use string::IndexedString;

pub type Result<T> = std::result::Result<T, error::Error>;

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use proptest::prelude::*;
    use rand::{distributions::Uniform, Rng};

    use super::*;
    use std::io::{prelude::*, BufReader};

    fn sample_lines(amount: usize) -> Vec<String> {
        (0..amount)
            .map(|i| format!("{},name_{},{}", i, i * 7 % 13, "x".repeat(i % 17 + 1)))
            .collect()
    }

    fn write_file(content: &str) -> tempfile::NamedTempFile {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(content.as_bytes()).unwrap();
        tmp.flush().unwrap();
        tmp
    }

    #[test]
    fn test() {
        let lines = sample_lines(500);
        let contents = [
            format!("{}\n", lines.iter().join("\n")),
            format!("{}\r\n", lines.iter().join("\r\n")),
        ];

        for content in contents.iter() {
            let tmp = write_file(content);

            let mut indexed_file = File::open(tmp.path()).expect("failed opening file");
            test_random(&mut indexed_file, tmp.path());
            test_sequencially(&mut indexed_file, tmp.path());

            // Start over, this time reading sequencially first
            let mut indexed_file = File::open(tmp.path()).expect("failed opening file");
            test_sequencially(&mut indexed_file, tmp.path());
            test_random(&mut indexed_file, tmp.path());

            let mut indexed_string = IndexedString::from_str(content);
            test_sequencially(&mut indexed_string, tmp.path());
        }
    }

    fn original_lines(original_file: &std::path::Path) -> Vec<String> {
        let original = BufReader::new(std::fs::File::open(original_file).unwrap());
        original.lines().map(|i| i.unwrap()).collect()
    }

    fn test_sequencially<R: Read + Seek>(
        store: &mut IndexedLineStore<R>,
        original_file: &std::path::Path,
    ) {
        let original = original_lines(original_file);

        for (line, original) in original.iter().enumerate() {
            let read = store.read_line(line);
            assert_eq!(original, &read.unwrap().unwrap());
        }

        assert_eq!(store.read_line(original.len()).unwrap(), None);
        assert!(store.is_end_of_stream());
    }

    fn test_random<R: Read + Seek>(
        store: &mut IndexedLineStore<R>,
        original_file: &std::path::Path,
    ) {
        let original = original_lines(original_file);

        let starts: Vec<_> = rand::thread_rng()
            .sample_iter(Uniform::new(0, original.len() + 10))
            .take(original.len())
            .collect();

        for start in starts {
            let count = rand::thread_rng().gen_range(0..20);
            let read = store.get_records(start, count).unwrap();

            let expected: Vec<_> = original.iter().skip(start).take(count).cloned().collect();
            assert_eq!(expected, read);
        }
    }

    #[test]
    fn test_idempotent() {
        let tmp = write_file("a,1\r\nb,2\nc,3");
        let mut file = File::open(tmp.path()).unwrap();

        let first = file.get_records(0, 3).unwrap();
        let second = file.get_records(0, 3).unwrap();
        assert_eq!(first, vec!["a,1", "b,2"]);
        assert_eq!(first, second);
        assert!(file.is_end_of_stream());
    }

    fn content_strategy() -> impl Strategy<Value = Vec<u8>> {
        prop::collection::vec(
            prop_oneof![
                4 => prop::sample::select(b"abc,;1".to_vec()),
                1 => Just(b'\n'),
                1 => Just(b'\r'),
            ],
            0..200,
        )
    }

    proptest! {
        #[test]
        fn prop_ranges_compose(
            content in content_strategy(),
            a in 0usize..40,
            b_off in 0usize..40,
            c_off in 0usize..40,
        ) {
            let b = a + b_off;
            let c = b + c_off;

            let mut whole = IndexedString::from_bytes(&content);
            let expected = whole.get_records(a, c - a).unwrap();

            let mut split = IndexedString::from_bytes(&content);
            let mut read = split.get_records(a, b - a).unwrap();
            read.extend(split.get_records(b, c - b).unwrap());

            prop_assert_eq!(&expected, &read);

            // Served from the index now
            prop_assert_eq!(&expected, &split.get_records(a, c - a).unwrap());
        }

        #[test]
        fn prop_matches_full_scan(content in content_strategy()) {
            let expected: Vec<_> = content
                .split(|b| *b == b'\n' || *b == b'\r')
                .collect::<Vec<_>>();
            // The last element has no terminator
            let expected: Vec<String> = expected[..expected.len() - 1]
                .iter()
                .filter(|line| !line.is_empty())
                .map(|line| String::from_utf8(line.to_vec()).unwrap())
                .collect();

            let mut store = IndexedString::from_bytes(&content);
            let read = store.get_records(0, content.len() + 1).unwrap();
            prop_assert_eq!(&expected, &read);
            prop_assert!(store.is_end_of_stream());
        }
    }
}
