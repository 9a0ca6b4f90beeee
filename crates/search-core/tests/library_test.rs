use std::collections::BTreeMap;
use std::fs;
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use rstest::rstest;
use query::{Condition, Field};
use search_core::{
    CorpusStore, Document, FileType, Library, LibraryConfig, LibraryError, MemoryStore,
    SearchMode, SearchRequest,
};
use tempfile::TempDir;

const SAMPLE: &str = "Test Document for API Testing\n\
    This document is used for testing the search API. More testing and search.";

fn disk_library(dir: &TempDir) -> Library {
    Library::open(&LibraryConfig::rooted_at(dir.path())).unwrap()
}

fn memory_library(dir: &TempDir) -> Library {
    Library::in_memory(&LibraryConfig::rooted_at(dir.path())).unwrap()
}

fn sample_docx(paragraphs: &[&str]) -> Vec<u8> {
    use docx_rs::{Docx, Paragraph, Run};

    let mut docx = Docx::new();
    for text in paragraphs {
        docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*text)));
    }
    let mut cursor = Cursor::new(Vec::new());
    docx.build().pack(&mut cursor).unwrap();
    cursor.into_inner()
}

fn ids(docs: &[search_core::Document]) -> Vec<String> {
    docs.iter().map(|d| d.id.clone()).collect()
}

#[rstest]
#[case::disk(true)]
#[case::memory(false)]
fn test_plain_text_scenario(#[case] on_disk: bool) {
    let dir = TempDir::new().unwrap();
    let library = if on_disk {
        disk_library(&dir)
    } else {
        memory_library(&dir)
    };

    let doc = library.ingest("test_document.txt", SAMPLE.as_bytes()).unwrap();
    assert_eq!(doc.file_type, FileType::Txt);
    assert_eq!(doc.keywords[0], "testing");
    assert_eq!(doc.title, "test_document.txt");
    assert_eq!(doc.abstract_text, doc.content);
    assert_eq!(doc.file_size, SAMPLE.len() as u64);
    assert!(Path::new(&doc.file_path).exists());

    let other = library
        .ingest("other.txt", b"a quick test of patience")
        .unwrap();

    // plain search
    let result = library.search(&SearchRequest::new("test")).unwrap();
    assert!(ids(&result.documents).contains(&doc.id));
    assert_eq!(result.total_count, result.documents.len());

    // boolean AND is a subset of OR
    let and = library
        .search(&SearchRequest::new("test AND document").boolean(true))
        .unwrap();
    assert_eq!(ids(&and.documents), vec![doc.id.clone()]);

    let or = library
        .search(&SearchRequest::new("test OR nonexistentterm").boolean(true))
        .unwrap();
    let or_ids = ids(&or.documents);
    assert!(or_ids.contains(&doc.id));
    assert!(or_ids.contains(&other.id));
    assert!(ids(&and.documents).iter().all(|id| or_ids.contains(id)));

    // misspelling recovered by the fuzzy fallback
    let result = library.search(&SearchRequest::new("documnt")).unwrap();
    assert_eq!(ids(&result.documents), vec![doc.id.clone()]);

    let result = library
        .search(&SearchRequest::new("documnt").fuzzy(false))
        .unwrap();
    assert!(result.documents.is_empty());

    // stats
    let stats = library.stats().unwrap();
    assert_eq!(stats.total_documents, 2);
    assert_eq!(stats.file_type_distribution.get("TXT"), Some(&2));

    // delete
    library.delete(&doc.id).unwrap();
    assert!(matches!(library.get(&doc.id), Err(LibraryError::NotFound(_))));
    assert!(matches!(library.delete(&doc.id), Err(LibraryError::NotFound(_))));
    assert!(!Path::new(&doc.file_path).exists());
    assert_eq!(library.list().unwrap().len(), 1);
}

#[rstest]
#[case(SearchMode::Title, "RELEASE_NOTES.TXT", true)]
#[case(SearchMode::Title, "notes", false)]
#[case(SearchMode::Content, "CHANGELOG ENTRY", true)]
#[case(SearchMode::Keywords, "changelog", true)]
#[case(SearchMode::Keywords, "change", false)]
fn test_search_modes(#[case] mode: SearchMode, #[case] query: &str, #[case] found: bool) {
    let dir = TempDir::new().unwrap();
    let library = disk_library(&dir);
    library
        .ingest("release_notes.txt", b"A changelog entry for the changelog reader.")
        .unwrap();

    let result = library
        .search(&SearchRequest::new(query).mode(mode).fuzzy(false))
        .unwrap();
    assert_eq!(!result.documents.is_empty(), found, "{mode} / {query}");
}

#[test]
fn test_docx_and_corrupt_pdf() {
    let dir = TempDir::new().unwrap();
    let library = disk_library(&dir);

    let docx = library
        .ingest("field_guide.docx", &sample_docx(&["Echidna burrows", "Numbat diets"]))
        .unwrap();
    assert_eq!(docx.file_type, FileType::Docx);
    assert!(docx.content.contains("Echidna burrows"));
    assert!(docx.keywords.contains(&"echidna".to_string()));

    let pdf = library
        .ingest("broken.pdf", b"%PDF-1.7 this file was cut short")
        .unwrap();
    assert_eq!(pdf.file_type, FileType::Pdf);
    assert!(pdf.content.is_empty());
    assert!(pdf.abstract_text.is_empty());
    assert!(pdf.keywords.is_empty());
    assert_eq!(pdf.title, "broken.pdf");

    let result = library
        .search(&SearchRequest::new("numbat").filter("fileType", "DOCX"))
        .unwrap();
    assert_eq!(ids(&result.documents), vec![docx.id.clone()]);

    let result = library
        .search(&SearchRequest::new("numbat").filter("fileType", "PDF").fuzzy(false))
        .unwrap();
    assert!(result.documents.is_empty());
}

#[test]
fn test_unknown_extension() {
    let dir = TempDir::new().unwrap();
    let library = memory_library(&dir);

    let text = library.ingest("README", b"just some words").unwrap();
    assert_eq!(text.file_type, FileType::Txt);

    let binary = library.ingest("blob.bin", &[0u8, 159, 146, 150]).unwrap();
    assert_eq!(binary.file_type, FileType::Unknown);
    assert!(binary.content.is_empty());
}

#[test]
fn test_upload_path_uses_basename() {
    let dir = TempDir::new().unwrap();
    let config = LibraryConfig::rooted_at(dir.path());
    let library = Library::in_memory(&config).unwrap();

    let doc = library.ingest("../../escape/notes.txt", b"hello").unwrap();
    let stored = Path::new(&doc.file_path);
    assert_eq!(stored.parent().unwrap(), config.upload_dir);
    assert!(stored.file_name().unwrap().to_str().unwrap().ends_with("_notes.txt"));
    assert_eq!(doc.title, "notes.txt");
}

#[test]
fn test_validation_errors() {
    let dir = TempDir::new().unwrap();
    let library = memory_library(&dir);

    assert!(matches!(
        library.search(&SearchRequest::new("  ")),
        Err(LibraryError::Validation(_))
    ));
    assert!(matches!(
        library.search(&SearchRequest::new("x").filter("dateTo", "someday")),
        Err(LibraryError::Validation(_))
    ));
}

#[test]
fn test_date_filters() {
    let dir = TempDir::new().unwrap();
    let library = memory_library(&dir);
    library.ingest("a.txt", b"wallaby").unwrap();

    let result = library
        .search(&SearchRequest::new("wallaby").filter("dateFrom", "2000-01-01"))
        .unwrap();
    assert_eq!(result.total_count, 1);

    let result = library
        .search(
            &SearchRequest::new("wallaby")
                .filter("dateTo", "2000-01-01")
                .fuzzy(false),
        )
        .unwrap();
    assert_eq!(result.total_count, 0);
}

#[test]
fn test_reopen_disk_library() {
    let dir = TempDir::new().unwrap();
    let id = {
        let library = disk_library(&dir);
        library.ingest("kept.txt", b"persistent bilby records").unwrap().id
    };

    let library = disk_library(&dir);
    assert_eq!(library.get(&id).unwrap().title, "kept.txt");
    let result = library.search(&SearchRequest::new("bilby")).unwrap();
    assert_eq!(ids(&result.documents), vec![id]);
}

#[test]
fn test_concurrent_ingestion() {
    let dir = TempDir::new().unwrap();
    let library = Arc::new(disk_library(&dir));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let library = Arc::clone(&library);
            std::thread::spawn(move || {
                library
                    .ingest(&format!("doc{i}.txt"), format!("quoll number {i}").as_bytes())
                    .unwrap()
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(library.stats().unwrap().total_documents, 4);
    assert_eq!(library.search(&SearchRequest::new("quoll")).unwrap().total_count, 4);
}

#[rstest]
#[case("wombat AND kangaroo")]
#[case("author:wombat")]
#[case("+kangaroo wombat")]
#[case("wombat -burrows")]
fn test_plain_query_has_no_operators(#[case] query: &str) {
    let dir = TempDir::new().unwrap();
    let library = disk_library(&dir);
    let doc = library
        .ingest("burrows.txt", b"wombat burrows underground")
        .unwrap();

    let result = library
        .search(&SearchRequest::new(query).fuzzy(false))
        .unwrap();
    assert_eq!(ids(&result.documents), vec![doc.id]);
}

/// 写入总是失败的存储
struct RejectingStore(MemoryStore);

impl CorpusStore for RejectingStore {
    fn insert(&self, _doc: Document) -> anyhow::Result<()> {
        anyhow::bail!("disk full")
    }

    fn ensure_text_index(&self, fields: &[Field]) -> anyhow::Result<()> {
        self.0.ensure_text_index(fields)
    }

    fn find_by_query(&self, condition: &Condition, limit: usize) -> anyhow::Result<Vec<Document>> {
        self.0.find_by_query(condition, limit)
    }

    fn find_all(&self, limit: usize) -> anyhow::Result<Vec<Document>> {
        self.0.find_all(limit)
    }

    fn find_by_id(&self, id: &str) -> anyhow::Result<Option<Document>> {
        self.0.find_by_id(id)
    }

    fn delete_by_id(&self, id: &str) -> anyhow::Result<usize> {
        self.0.delete_by_id(id)
    }

    fn aggregate_count_by_field(&self, field: Field) -> anyhow::Result<BTreeMap<String, usize>> {
        self.0.aggregate_count_by_field(field)
    }

    fn count(&self) -> anyhow::Result<usize> {
        self.0.count()
    }
}

#[test]
fn test_failed_insert_removes_stored_file() {
    let dir = TempDir::new().unwrap();
    let config = LibraryConfig::rooted_at(dir.path());
    let library =
        Library::with_store(&config, Arc::new(RejectingStore(MemoryStore::new()))).unwrap();

    let err = library.ingest("notes.txt", b"lost words").unwrap_err();
    assert!(matches!(err, LibraryError::Store(_)));
    assert_eq!(fs::read_dir(&config.upload_dir).unwrap().count(), 0);
}
