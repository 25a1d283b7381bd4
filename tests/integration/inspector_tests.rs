//! Integration tests for keyword inspection
//!
//! These tests run the inspector against the sample program model and
//! against small programs built in code.

use keywordtrace::analysis::{HitScope, InspectionPolicy, KeywordInspector};
use keywordtrace::keywords::KeywordSet;
use keywordtrace::program::{
    text_form, AnalysisFacade, ModelLoader, ProgramBuilder, ProgramGraph, Statement, StatementRef,
};
use std::collections::{BTreeSet, HashSet};
use std::path::PathBuf;

/// Get the path to the test fixtures directory
fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load_sample() -> ProgramGraph {
    ModelLoader::default()
        .load(&fixtures_path().join("sample_app.json"))
        .expect("Failed to load sample model")
}

fn load_keywords() -> KeywordSet {
    KeywordSet::load(&fixtures_path().join("keywords.txt")).expect("Failed to load keywords")
}

fn hit_statements(inspector: &KeywordInspector) -> HashSet<StatementRef> {
    inspector.hits().iter().map(|h| h.statement).collect()
}

/// Program mixing interesting/library invocations and plain statements
fn mixed_program() -> ProgramGraph {
    let mut builder = ProgramBuilder::new();
    builder
        .add_method(
            "<com.example.Mixed: void run()>",
            "com.example.Mixed",
            vec![
                Statement::plain("$r1 = \"token=secret\""),
                Statement::invoke(
                    "staticinvoke <android.util.Log: int e(java.lang.String,java.lang.String)>(\"secret\", $r1)",
                    "<android.util.Log: int e(java.lang.String,java.lang.String)>",
                    true,
                    false,
                ),
                Statement::invoke(
                    "virtualinvoke $r2.<okhttp3.OkHttpClient: okhttp3.Call newCall(okhttp3.Request)>($r3)",
                    "<okhttp3.OkHttpClient: okhttp3.Call newCall(okhttp3.Request)>",
                    true,
                    true,
                ),
                Statement::invoke(
                    "staticinvoke <com.example.Crypto: java.lang.String secret()>()",
                    "<com.example.Crypto: java.lang.String secret()>",
                    false,
                    false,
                ),
            ],
        )
        .unwrap();
    builder.build()
}

fn mixed_keywords() -> KeywordSet {
    KeywordSet::parse("secret\nnewCall\nLog")
}

// ============================================================================
// Sample Model Tests
// ============================================================================

mod sample_model_tests {
    use super::*;

    #[test]
    fn test_default_policy_hits() {
        let program = load_sample();
        let inspector =
            KeywordInspector::inspect(&program, &load_keywords(), &InspectionPolicy::default());

        let keywords: Vec<&str> = inspector.hits().iter().map(|h| h.keyword.as_str()).collect();
        assert_eq!(
            keywords,
            vec!["AppCompatActivity", "android.util.Log", "getDeviceId", "sendTextMessage"]
        );

        let expected: BTreeSet<String> = [
            "AppCompatActivity",
            "android.util.Log",
            "getDeviceId",
            "sendTextMessage",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        assert_eq!(inspector.keywords_hit(), &expected);
    }

    #[test]
    fn test_keywords_in_package() {
        let program = load_sample();
        let inspector =
            KeywordInspector::inspect(&program, &load_keywords(), &InspectionPolicy::default());

        let in_package: Vec<&str> =
            inspector.keywords_in_package().iter().map(String::as_str).collect();
        assert_eq!(in_package, vec!["example"]);
        assert!(!inspector.keywords_hit().contains("example"));
    }

    #[test]
    fn test_all_statements_policy() {
        let program = load_sample();
        let policy = InspectionPolicy::new().with_interested_api_only(false);
        let inspector = KeywordInspector::inspect(&program, &load_keywords(), &policy);

        assert_eq!(inspector.hits().len(), 8);
        assert!(inspector.keywords_hit().contains("example"));
        assert!(!inspector.keywords_hit().contains("unused_keyword"));
        assert!(inspector
            .hits()
            .iter()
            .all(|h| h.scope == HitScope::AnyStatement));
    }

    #[test]
    fn test_libraries_only_policy() {
        let program = load_sample();
        let policy = InspectionPolicy::new().with_api_in_libraries_only(true);
        let inspector = KeywordInspector::inspect(&program, &load_keywords(), &policy);

        assert_eq!(inspector.hits().len(), 1);
        assert_eq!(inspector.hits()[0].keyword, "AppCompatActivity");
        assert_eq!(inspector.hits()[0].scope, HitScope::LibraryApi);
    }

    #[test]
    fn test_container_symbol_statements() {
        let program = load_sample();
        let policy = InspectionPolicy::new().with_record_container_symbol(true);
        let inspector = KeywordInspector::inspect(&program, &load_keywords(), &policy);

        assert_eq!(
            inspector.container_symbol_statements(),
            &["$r1 = new java.util.HashMap".to_string()]
        );
    }
}

// ============================================================================
// Policy Property Tests
// ============================================================================

mod policy_tests {
    use super::*;

    #[test]
    fn test_hits_match_eligible_substrings_exactly() {
        let program = mixed_program();
        let keywords = mixed_keywords();

        for policy in [
            InspectionPolicy::default(),
            InspectionPolicy::new().with_api_in_libraries_only(true),
            InspectionPolicy::new().with_interested_api_only(false),
        ] {
            let inspector = KeywordInspector::inspect(&program, &keywords, &policy);

            let mut expected = Vec::new();
            for method in program.methods() {
                for (index, stmt) in program.statements(method).iter().enumerate() {
                    if !policy.is_eligible(stmt) {
                        continue;
                    }
                    for keyword in keywords.iter() {
                        if text_form(stmt).contains(keyword) {
                            expected.push((StatementRef { method, index }, keyword.to_string()));
                        }
                    }
                }
            }

            let actual: Vec<_> = inspector
                .hits()
                .iter()
                .map(|h| (h.statement, h.keyword.clone()))
                .collect();
            assert_eq!(actual, expected, "policy {:?}", policy);
        }
    }

    #[test]
    fn test_keywords_hit_derived_from_hits() {
        let inspector = KeywordInspector::inspect(
            &mixed_program(),
            &mixed_keywords(),
            &InspectionPolicy::new().with_interested_api_only(false),
        );

        let from_hits: BTreeSet<String> =
            inspector.hits().iter().map(|h| h.keyword.clone()).collect();
        assert_eq!(inspector.keywords_hit(), &from_hits);
    }

    #[test]
    fn test_disabling_api_filter_is_monotonic() {
        let program = mixed_program();
        let keywords = mixed_keywords();

        let filtered = KeywordInspector::inspect(&program, &keywords, &InspectionPolicy::default());
        let unfiltered = KeywordInspector::inspect(
            &program,
            &keywords,
            &InspectionPolicy::new().with_interested_api_only(false),
        );

        let filtered = hit_statements(&filtered);
        let unfiltered = hit_statements(&unfiltered);
        assert!(filtered.is_subset(&unfiltered));
        assert!(unfiltered.len() > filtered.len());
    }

    #[test]
    fn test_libraries_only_is_a_subset() {
        let program = mixed_program();
        let keywords = mixed_keywords();

        let all = KeywordInspector::inspect(&program, &keywords, &InspectionPolicy::default());
        let libraries = KeywordInspector::inspect(
            &program,
            &keywords,
            &InspectionPolicy::new().with_api_in_libraries_only(true),
        );

        let all = hit_statements(&all);
        let libraries = hit_statements(&libraries);
        assert!(libraries.is_subset(&all));
        assert_eq!(libraries.len(), 1);
    }

    #[test]
    fn test_one_hit_per_keyword_per_statement() {
        let mut builder = ProgramBuilder::new();
        builder
            .add_method(
                "<app.A: void a()>",
                "app.A",
                vec![Statement::plain("secret secret secret token")],
            )
            .unwrap();
        let program = builder.build();

        let inspector = KeywordInspector::inspect(
            &program,
            &KeywordSet::parse("secret\ntoken"),
            &InspectionPolicy::new().with_interested_api_only(false),
        );

        assert_eq!(inspector.hits().len(), 2);
        assert_eq!(inspector.hits()[0].statement, inspector.hits()[1].statement);
    }
}

// ============================================================================
// Edge Cases
// ============================================================================

mod edge_case_tests {
    use super::*;

    #[test]
    fn test_empty_keyword_set() {
        let program = load_sample();
        let policy = InspectionPolicy::new()
            .with_interested_api_only(false)
            .with_record_container_symbol(true);
        let inspector = KeywordInspector::inspect(&program, &KeywordSet::new(), &policy);

        assert!(inspector.hits().is_empty());
        assert!(inspector.keywords_hit().is_empty());
        assert!(inspector.keywords_in_package().is_empty());
        assert_eq!(inspector.container_symbol_statements().len(), 1);
    }

    #[test]
    fn test_empty_program() {
        let program = ProgramBuilder::new().build();
        let inspector =
            KeywordInspector::inspect(&program, &load_keywords(), &InspectionPolicy::default());

        assert!(inspector.hits().is_empty());
        assert!(inspector.keywords_in_package().is_empty());
    }

    #[test]
    fn test_hit_keyword_is_substring_of_text() {
        let program = load_sample();
        let keywords = load_keywords();
        let inspector = KeywordInspector::inspect(
            &program,
            &keywords,
            &InspectionPolicy::new().with_interested_api_only(false),
        );

        for hit in inspector.hits() {
            assert!(keywords.contains(&hit.keyword));
            assert!(hit.text.contains(&hit.keyword));
            let stmt = &program.statements(hit.method())[hit.statement.index];
            assert_eq!(text_form(stmt), hit.text);
        }
    }
}
