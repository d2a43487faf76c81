//! Tests for writing and reading the JSON tile index

#[cfg(test)]
mod tests {
    use photomosaic::MosaicError;
    use photomosaic::algorithm::index::TileIndex;
    use photomosaic::analysis::signature::ColorSignature;
    use photomosaic::io::index_file::{read_index, write_index};
    use std::fs;
    use tempfile::TempDir;

    fn sample() -> TileIndex {
        let mut index = TileIndex::new();
        index.insert("sunset.jpg", ColorSignature::new(230, 120, 40));
        index.insert("forest.png", ColorSignature::new(20, 90, 30));
        index
    }

    #[test]
    fn test_written_index_reads_back_equal() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("photos_tiles.json");

        write_index(&sample(), &path).unwrap();

        assert_eq!(read_index(&path).unwrap(), sample());
    }

    // Tests the document layout: pretty object, sorted keys, trailing newline
    // Verified by writing compact JSON
    #[test]
    fn test_document_layout_is_stable() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("index.json");

        write_index(&sample(), &path).unwrap();
        let text = fs::read_to_string(&path).unwrap();

        let expected = "{\n  \"forest.png\": [\n    20,\n    90,\n    30\n  ],\n  \"sunset.jpg\": [\n    230,\n    120,\n    40\n  ]\n}\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_rewriting_replaces_previous_contents() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("index.json");
        write_index(&sample(), &path).unwrap();

        write_index(&TileIndex::new(), &path).unwrap();

        assert!(read_index(&path).unwrap().is_empty());
    }

    // Tests malformed documents are rejected instead of partially loaded
    // Verified by skipping entries that fail to parse
    #[test]
    fn test_malformed_documents_are_rejected() {
        let temp = TempDir::new().unwrap();
        let cases = [
            r#"{"a.png": [1, 2]}"#,
            r#"{"a.png": [1, 2, 300]}"#,
            r#"{"a.png": "red"}"#,
            r#"["a.png"]"#,
            "{",
        ];

        for (i, document) in cases.iter().enumerate() {
            let path = temp.path().join(format!("bad{i}.json"));
            fs::write(&path, document).unwrap();
            assert!(
                matches!(read_index(&path), Err(MosaicError::IndexFormat { .. })),
                "{document}"
            );
        }
    }

    #[test]
    fn test_missing_index_is_file_system_error() {
        let temp = TempDir::new().unwrap();

        let result = read_index(&temp.path().join("absent.json"));

        assert!(matches!(result, Err(MosaicError::FileSystem { .. })));
    }
}
