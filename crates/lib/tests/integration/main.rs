//! Integration tests for the playerdata document store.

mod documents_tests;
