//! Reads, writes, deletes and existence checks.

use std::collections::BTreeMap;

use playerdata::{Format, StoreError};

use crate::common::{Progress, TestEnv, progress};

#[test]
fn string_roundtrip() {
  let env = TestEnv::desktop();

  for path in [vec!["a.txt"], vec!["nested", "b.txt"], vec!["deep", "er", "c.txt"]] {
    env.store.write_string("line one\nline two", path.as_slice()).unwrap();
    assert_eq!(env.store.read_string(path.as_slice()).unwrap(), "line one\nline two");
  }
}

#[test]
fn json_roundtrip() {
  let env = TestEnv::desktop();

  env.store.write_json(&progress(), &["progress.json"]).unwrap();
  let loaded: Progress = env.store.read_json(&["progress.json"]).unwrap();

  assert_eq!(loaded, progress());
}

#[test]
fn xml_roundtrip() {
  let env = TestEnv::desktop();

  env.store.write_xml(&progress(), &["saves", "progress.xml"]).unwrap();
  let loaded: Progress = env.store.read_xml(&["saves", "progress.xml"]).unwrap();

  assert_eq!(loaded, progress());
  let raw = env.store.read_string(&["saves", "progress.xml"]).unwrap();
  assert!(raw.starts_with("<Progress>"));
}

#[test]
fn owned_segments_are_accepted() {
  let env = TestEnv::desktop();
  let path = vec!["profiles".to_string(), format!("player-{}.txt", 1)];

  env.store.write_string("one", path.as_slice()).unwrap();

  assert!(env.store.has_file(path.as_slice()).unwrap());
}

#[test]
fn has_file_flips_after_each_kind_of_write() {
  let env = TestEnv::desktop();

  assert!(!env.store.has_file(&["s.txt"]).unwrap());
  env.store.write_string("s", &["s.txt"]).unwrap();
  assert!(env.store.has_file(&["s.txt"]).unwrap());

  assert!(!env.store.has_file(&["j.json"]).unwrap());
  env.store.write_json(&progress(), &["j.json"]).unwrap();
  assert!(env.store.has_file(&["j.json"]).unwrap());

  assert!(!env.store.has_file(&["x.xml"]).unwrap());
  env.store.write_xml(&progress(), &["x.xml"]).unwrap();
  assert!(env.store.has_file(&["x.xml"]).unwrap());
}

#[test]
fn has_file_is_false_for_directories() {
  let env = TestEnv::desktop();
  env.store.create_directory(&["saves"]).unwrap();

  assert!(!env.store.has_file(&["saves"]).unwrap());
  assert!(env.store.has_directory(&["saves"]).unwrap());
}

#[test]
fn delete_removes_file() {
  let env = TestEnv::desktop();
  env.store.write_string("bye", &["gone.txt"]).unwrap();

  assert!(env.store.delete(&["gone.txt"]).unwrap());

  assert!(!env.store.has_file(&["gone.txt"]).unwrap());
}

#[test]
fn delete_removes_directory_recursively() {
  let env = TestEnv::desktop();
  env.store.write_string("1", &["saves", "a", "one.txt"]).unwrap();
  env.store.write_string("2", &["saves", "two.txt"]).unwrap();

  assert!(env.store.delete(&["saves"]).unwrap());

  assert!(!env.store.has_directory(&["saves"]).unwrap());
  assert!(env.root().is_dir());
}

#[test]
fn delete_missing_path_returns_false() {
  let env = TestEnv::desktop();
  assert!(!env.store.delete(&["never-written.txt"]).unwrap());
}

#[test]
fn create_directory_is_idempotent() {
  let env = TestEnv::desktop();

  env.store.create_directory(&["profiles", "local"]).unwrap();
  assert!(env.store.has_directory(&["profiles", "local"]).unwrap());

  env.store.create_directory(&["profiles", "local"]).unwrap();
  assert!(env.store.has_directory(&["profiles", "local"]).unwrap());
}

#[test]
fn create_directory_creates_root() {
  let env = TestEnv::sandboxed();
  assert!(!env.root().exists());

  env.store.create_directory(&["cache"]).unwrap();

  assert!(env.root().is_dir());
}

#[test]
fn wrong_schema_is_serialization_error() {
  let env = TestEnv::desktop();
  env.store.write_string(r#"{"unexpected": "structure"}"#, &["p.json"]).unwrap();
  env.store.write_string("<Other/>", &["p.xml"]).unwrap();

  let json = env.store.read_json::<Progress, _>(&["p.json"]);
  assert!(matches!(json, Err(StoreError::Serialization { format: Format::Json, .. })));

  let xml = env.store.read_xml::<Progress, _>(&["p.xml"]);
  assert!(matches!(xml, Err(StoreError::Serialization { format: Format::Xml, .. })));
}

#[test]
fn reading_directory_is_storage_error() {
  let env = TestEnv::desktop();
  env.store.create_directory(&["saves"]).unwrap();

  let result = env.store.read_string(&["saves"]);
  assert!(matches!(result, Err(StoreError::Storage { .. })));
}

#[test]
fn empty_path_is_rejected_everywhere() {
  let env = TestEnv::desktop();
  let empty: [&str; 0] = [];

  assert!(matches!(env.store.read_string(&empty), Err(StoreError::InvalidPath)));
  assert!(matches!(env.store.write_string("x", &empty), Err(StoreError::InvalidPath)));
  assert!(matches!(env.store.read_json::<Progress, _>(&empty), Err(StoreError::InvalidPath)));
  assert!(matches!(env.store.write_json(&progress(), &empty), Err(StoreError::InvalidPath)));
  assert!(matches!(env.store.read_xml::<Progress, _>(&empty), Err(StoreError::InvalidPath)));
  assert!(matches!(env.store.write_xml(&progress(), &empty), Err(StoreError::InvalidPath)));
  assert!(matches!(env.store.delete(&empty), Err(StoreError::InvalidPath)));
  assert!(matches!(env.store.has_file(&empty), Err(StoreError::InvalidPath)));
  assert!(matches!(env.store.has_directory(&empty), Err(StoreError::InvalidPath)));
  assert!(matches!(env.store.create_directory(&empty), Err(StoreError::InvalidPath)));

  // Rejected before touching the filesystem
  assert!(!env.root().exists());
  assert_eq!(StoreError::InvalidPath.to_string(), "no path specified");
}

#[test]
fn absolute_segments_stay_under_root() {
  let env = TestEnv::desktop();
  let outside = env.temp.path().join("outside.txt");
  std::fs::write(&outside, "not ours").unwrap();
  let outside_str = outside.to_str().unwrap();

  assert!(!env.store.delete(&[outside_str]).unwrap());
  assert!(!env.store.has_file(&[outside_str]).unwrap());
  assert_eq!(std::fs::read_to_string(&outside).unwrap(), "not ours");

  env.store.write_string("inside", &["/etc", "passwd"]).unwrap();
  assert!(env.root().join("etc").join("passwd").is_file());
}

#[test]
fn parent_segments_are_rejected() {
  let env = TestEnv::desktop();
  std::fs::write(env.temp.path().join("sibling.txt"), "not ours").unwrap();

  let read = env.store.read_string(&["..", "sibling.txt"]);
  assert!(matches!(read, Err(StoreError::InvalidSegment(_))));

  let delete = env.store.delete(&["saves/../../sibling.txt"]);
  assert!(matches!(delete, Err(StoreError::InvalidSegment(_))));

  let write = env.store.write_string("x", &[".."]);
  assert!(matches!(write, Err(StoreError::InvalidSegment(_))));

  assert!(env.temp.path().join("sibling.txt").is_file());
}

#[test]
fn encode_failure_leaves_existing_file_untouched() {
  let env = TestEnv::desktop();
  env.store.write_string("original", &["data.json"]).unwrap();
  env.store.write_string("original", &["data.xml"]).unwrap();

  // JSON object keys must be strings
  let mut unencodable = BTreeMap::new();
  unencodable.insert(vec![1u32, 2], 3u32);
  let json = env.store.write_json(&unencodable, &["data.json"]);
  assert!(matches!(json, Err(StoreError::Serialization { format: Format::Json, .. })));

  // XML needs a named root element
  let xml = env.store.write_xml(&vec![1, 2, 3], &["data.xml"]);
  assert!(matches!(xml, Err(StoreError::Serialization { format: Format::Xml, .. })));

  assert_eq!(env.store.read_string(&["data.json"]).unwrap(), "original");
  assert_eq!(env.store.read_string(&["data.xml"]).unwrap(), "original");
}

#[test]
fn xml_preserves_surrounding_whitespace() {
  let env = TestEnv::desktop();

  for checkpoint in ["  padded  ", "", "\ttabbed\n"] {
    let saved = Progress {
      checkpoint: checkpoint.to_string(),
      ..progress()
    };
    env.store.write_xml(&saved, &["ws.xml"]).unwrap();
    let loaded: Progress = env.store.read_xml(&["ws.xml"]).unwrap();
    assert_eq!(loaded, saved);
  }
}
