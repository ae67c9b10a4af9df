//! Materializer and record binding tests

use pg_dialect::{DialectError, ElemKind, FieldKind, PgValue};

use crate::errors::FetchError;
use crate::materialize::{fetch, fetch_all, fetch_all_boxed, fetch_one, Destination};
use crate::memory::MemoryExecutor;
use crate::record::{column_to_field_name, snake_to_upper_camel, FieldDescriptor, Record};
use crate::scope::{BindMode, QueryScope};

#[derive(Debug, Default, Clone, PartialEq)]
struct Account {
    id: i64,
    user_name: String,
    balance: f64,
    tags: Vec<String>,
    scores: Vec<i32>,
    weights: Vec<f64>,
    load_count: u32,
}

impl Record for Account {
    fn fields() -> &'static [FieldDescriptor<Self>] {
        fn set_id(a: &mut Account, v: PgValue) -> Result<(), DialectError> {
            match v {
                PgValue::Null => Ok(()),
                PgValue::Int(n) => {
                    a.id = n;
                    Ok(())
                }
                other => Err(DialectError::mismatch("integer", other.kind_name())),
            }
        }
        fn set_user_name(a: &mut Account, v: PgValue) -> Result<(), DialectError> {
            match v {
                PgValue::Null => Ok(()),
                PgValue::Text(s) => {
                    a.user_name = s;
                    Ok(())
                }
                other => Err(DialectError::mismatch("text", other.kind_name())),
            }
        }
        fn set_balance(a: &mut Account, v: PgValue) -> Result<(), DialectError> {
            match v {
                PgValue::Null => Ok(()),
                PgValue::Float(f) => {
                    a.balance = f;
                    Ok(())
                }
                PgValue::Int(n) => {
                    a.balance = n as f64;
                    Ok(())
                }
                other => Err(DialectError::mismatch("float", other.kind_name())),
            }
        }
        fn set_tags(a: &mut Account, v: PgValue) -> Result<(), DialectError> {
            match v {
                PgValue::Null => Ok(()),
                PgValue::TextSeq(items) => {
                    a.tags = items;
                    Ok(())
                }
                other => Err(DialectError::mismatch("text sequence", other.kind_name())),
            }
        }
        fn set_scores(a: &mut Account, v: PgValue) -> Result<(), DialectError> {
            match v {
                PgValue::Null => Ok(()),
                PgValue::IntSeq(items) => {
                    let mut out = Vec::with_capacity(items.len());
                    for item in items {
                        out.push(item as i32);
                    }
                    a.scores = out;
                    Ok(())
                }
                other => Err(DialectError::mismatch("integer sequence", other.kind_name())),
            }
        }
        fn set_weights(a: &mut Account, v: PgValue) -> Result<(), DialectError> {
            match v {
                PgValue::Null => Ok(()),
                PgValue::FloatSeq(items) => {
                    a.weights = items;
                    Ok(())
                }
                other => Err(DialectError::mismatch("float sequence", other.kind_name())),
            }
        }

        static FIELDS: &[FieldDescriptor<Account>] = &[
            FieldDescriptor {
                name: "Id",
                kind: FieldKind::Int64,
                size: 0,
                primary_key: true,
                set: set_id,
            },
            FieldDescriptor {
                name: "UserName",
                kind: FieldKind::Text,
                size: 100,
                primary_key: false,
                set: set_user_name,
            },
            FieldDescriptor {
                name: "Balance",
                kind: FieldKind::Float64,
                size: 0,
                primary_key: false,
                set: set_balance,
            },
            FieldDescriptor {
                name: "Tags",
                kind: FieldKind::Seq(ElemKind::Text),
                size: 0,
                primary_key: false,
                set: set_tags,
            },
            FieldDescriptor {
                name: "Scores",
                kind: FieldKind::Seq(ElemKind::Int32),
                size: 0,
                primary_key: false,
                set: set_scores,
            },
            FieldDescriptor {
                name: "Weights",
                kind: FieldKind::Seq(ElemKind::Float64),
                size: 0,
                primary_key: false,
                set: set_weights,
            },
        ];
        FIELDS
    }

    fn on_loaded(&mut self) {
        self.load_count += 1;
    }
}

fn account_executor() -> MemoryExecutor {
    MemoryExecutor::new(vec!["id", "user_name", "balance"])
}

// ========================================
// Naming convention
// ========================================

#[test]
fn test_snake_to_upper_camel() {
    assert_eq!(snake_to_upper_camel("user_name"), "UserName");
    assert_eq!(snake_to_upper_camel("id"), "Id");
    assert_eq!(snake_to_upper_camel("a_b_c"), "ABC");
    assert_eq!(snake_to_upper_camel(""), "");
}

#[test]
fn test_column_to_field_name_is_case_insensitive() {
    assert_eq!(column_to_field_name("user_name"), "UserName");
    assert_eq!(column_to_field_name("USER_NAME"), "UserName");
    assert_eq!(column_to_field_name("User_Name"), "UserName");
}

#[test]
fn test_field_index_lookup() {
    assert_eq!(Account::field_index("Id"), Some(0));
    assert_eq!(Account::field_index("UserName"), Some(1));
    assert_eq!(Account::field_index("Nope"), None);
}

// ========================================
// Materialization
// ========================================

#[tokio::test]
async fn test_fetch_all_materializes_rows_in_order() {
    let mut executor = account_executor();
    executor.push_row(vec![
        PgValue::Int(1),
        PgValue::Text("ada".into()),
        PgValue::Float(10.5),
    ]);
    executor.push_row(vec![
        PgValue::Int(2),
        PgValue::Text("brin".into()),
        PgValue::Float(0.0),
    ]);

    let mut scope = QueryScope::new("SELECT * FROM accounts");
    let accounts: Vec<Account> = fetch_all(&executor, &mut scope).await.unwrap();

    assert_eq!(accounts.len(), 2);
    assert_eq!(accounts[0].id, 1);
    assert_eq!(accounts[0].user_name, "ada");
    assert_eq!(accounts[1].id, 2);
    assert_eq!(accounts[1].user_name, "brin");
    assert!(executor.cursor_closed());
}

#[tokio::test]
async fn test_fetch_one_binds_case_insensitive_columns() {
    let mut executor = MemoryExecutor::new(vec!["ID", "USER_NAME"]);
    executor.push_row(vec![PgValue::Int(7), PgValue::Text("carol".into())]);

    let mut scope = QueryScope::new("SELECT * FROM accounts LIMIT 1");
    let account: Account = fetch_one(&executor, &mut scope).await.unwrap();

    assert_eq!(account.id, 7);
    assert_eq!(account.user_name, "carol");
}

#[tokio::test]
async fn test_unmatched_column_discarded_without_shifting() {
    let mut executor = MemoryExecutor::new(vec!["id", "legacy_blob", "user_name"]);
    executor.push_row(vec![
        PgValue::Int(3),
        PgValue::Bytes(vec![0xde, 0xad]),
        PgValue::Text("dora".into()),
    ]);

    let mut scope = QueryScope::new("SELECT * FROM accounts");
    let accounts: Vec<Account> = fetch_all(&executor, &mut scope).await.unwrap();

    assert_eq!(accounts[0].id, 3);
    assert_eq!(accounts[0].user_name, "dora");
    assert!(!scope.has_errors());
}

#[tokio::test]
async fn test_strict_mode_rejects_unmatched_column() {
    let mut executor = MemoryExecutor::new(vec!["id", "legacy_blob"]);
    executor.push_row(vec![PgValue::Int(3), PgValue::Null]);

    let mut scope = QueryScope::new("SELECT * FROM accounts").bind_mode(BindMode::Strict);
    let result: Result<Vec<Account>, _> = fetch_all(&executor, &mut scope).await;

    assert!(matches!(
        result,
        Err(FetchError::UnmatchedColumn { ref column }) if column == "legacy_blob"
    ));
    assert!(executor.cursor_closed());
}

#[tokio::test]
async fn test_fetch_one_zero_rows_is_not_found() {
    let executor = account_executor();
    let mut scope = QueryScope::new("SELECT * FROM accounts WHERE id = $1 LIMIT 1").bind(99i64);

    let result: Result<Account, _> = fetch_one(&executor, &mut scope).await;
    let error = result.unwrap_err();

    assert!(error.is_not_found());
    assert!(executor.cursor_closed());
}

#[tokio::test]
async fn test_fetch_all_zero_rows_is_empty_without_error() {
    let executor = account_executor();
    let mut scope = QueryScope::new("SELECT * FROM accounts");

    let accounts: Vec<Account> = fetch_all(&executor, &mut scope).await.unwrap();

    assert!(accounts.is_empty());
    assert!(!scope.has_errors());
    assert!(executor.cursor_closed());
}

#[tokio::test]
async fn test_execution_failure_aborts_before_iteration() {
    let mut executor = account_executor();
    executor.fail_execution("relation does not exist");

    let mut scope = QueryScope::new("SELECT * FROM missing");
    let mut accounts: Vec<Account> = Vec::new();
    let result = fetch(
        &executor,
        &mut scope,
        Destination::Sequence(&mut accounts),
    )
    .await;

    assert!(matches!(result, Err(FetchError::Execution(_))));
    assert!(accounts.is_empty());
    assert_eq!(scope.errors().len(), 1);
    // No cursor was ever produced on this path.
    assert!(!executor.cursor_closed());
}

#[tokio::test]
async fn test_bind_error_recorded_and_iteration_continues() {
    let mut executor = account_executor();
    // Text where the integer id is expected.
    executor.push_row(vec![
        PgValue::Text("oops".into()),
        PgValue::Text("eve".into()),
        PgValue::Float(1.0),
    ]);
    executor.push_row(vec![
        PgValue::Int(5),
        PgValue::Text("frank".into()),
        PgValue::Float(2.0),
    ]);

    let mut scope = QueryScope::new("SELECT * FROM accounts");
    let mut accounts: Vec<Account> = Vec::new();
    let result = fetch(
        &executor,
        &mut scope,
        Destination::Sequence(&mut accounts),
    )
    .await;

    assert!(matches!(result, Err(FetchError::Bind { ref column, .. }) if column == "id"));
    // The failed bind did not halt the scan; both rows were produced and the
    // failed field kept its default.
    assert_eq!(accounts.len(), 2);
    assert_eq!(accounts[0].id, 0);
    assert_eq!(accounts[0].user_name, "eve");
    assert_eq!(accounts[1].id, 5);
    assert!(executor.cursor_closed());
}

#[tokio::test]
async fn test_strict_mode_aborts_on_bind_error() {
    let mut executor = account_executor();
    executor.push_row(vec![
        PgValue::Text("oops".into()),
        PgValue::Text("eve".into()),
        PgValue::Float(1.0),
    ]);
    executor.push_row(vec![
        PgValue::Int(5),
        PgValue::Text("frank".into()),
        PgValue::Float(2.0),
    ]);

    let mut scope = QueryScope::new("SELECT * FROM accounts").bind_mode(BindMode::Strict);
    let mut accounts: Vec<Account> = Vec::new();
    let result = fetch(
        &executor,
        &mut scope,
        Destination::Sequence(&mut accounts),
    )
    .await;

    assert!(matches!(result, Err(FetchError::Bind { .. })));
    assert!(executor.cursor_closed());
}

#[tokio::test]
async fn test_row_scan_error_skips_row_and_continues() {
    let mut executor = account_executor();
    executor.push_row(vec![
        PgValue::Int(1),
        PgValue::Text("gail".into()),
        PgValue::Float(0.0),
    ]);
    executor.push_row_error("tuple torn mid-read");
    executor.push_row(vec![
        PgValue::Int(2),
        PgValue::Text("hugo".into()),
        PgValue::Float(0.0),
    ]);

    let mut scope = QueryScope::new("SELECT * FROM accounts");
    let mut accounts: Vec<Account> = Vec::new();
    let result = fetch(
        &executor,
        &mut scope,
        Destination::Sequence(&mut accounts),
    )
    .await;

    assert!(matches!(result, Err(FetchError::RowScan(_))));
    assert_eq!(accounts.len(), 2);
    assert_eq!(accounts[0].id, 1);
    assert_eq!(accounts[1].id, 2);
}

// ========================================
// Deferred sequence fields
// ========================================

#[tokio::test]
async fn test_text_sequence_resolved_from_literal_bytes() {
    let mut executor = MemoryExecutor::new(vec!["id", "tags"]);
    executor.push_row(vec![
        PgValue::Int(1),
        PgValue::Bytes(b"{\"red\",\"green\"}".to_vec()),
    ]);

    let mut scope = QueryScope::new("SELECT id, tags FROM accounts");
    let accounts: Vec<Account> = fetch_all(&executor, &mut scope).await.unwrap();

    assert_eq!(accounts[0].tags, vec!["red", "green"]);
}

#[tokio::test]
async fn test_integer_sequence_resolved_with_widening_copy() {
    let mut executor = MemoryExecutor::new(vec!["id", "scores"]);
    executor.push_row(vec![PgValue::Int(1), PgValue::IntSeq(vec![7, -3, 42])]);

    let mut scope = QueryScope::new("SELECT id, scores FROM accounts");
    let accounts: Vec<Account> = fetch_all(&executor, &mut scope).await.unwrap();

    assert_eq!(accounts[0].scores, vec![7, -3, 42]);
}

#[tokio::test]
async fn test_float_sequence_left_at_default() {
    let mut executor = MemoryExecutor::new(vec!["id", "weights"]);
    executor.push_row(vec![PgValue::Int(1), PgValue::FloatSeq(vec![1.5, 2.5])]);

    let mut scope = QueryScope::new("SELECT id, weights FROM accounts");
    let accounts: Vec<Account> = fetch_all(&executor, &mut scope).await.unwrap();

    // Float sequence decode is unsupported; no error, value stays default.
    assert!(accounts[0].weights.is_empty());
    assert!(!scope.has_errors());
}

#[tokio::test]
async fn test_null_sequence_leaves_default_without_error() {
    let mut executor = MemoryExecutor::new(vec!["id", "tags"]);
    executor.push_row(vec![PgValue::Int(1), PgValue::Null]);

    let mut scope = QueryScope::new("SELECT id, tags FROM accounts");
    let accounts: Vec<Account> = fetch_all(&executor, &mut scope).await.unwrap();

    assert!(accounts[0].tags.is_empty());
    assert!(!scope.has_errors());
}

#[tokio::test]
async fn test_malformed_array_literal_is_a_bind_error() {
    let mut executor = MemoryExecutor::new(vec!["id", "tags"]);
    executor.push_row(vec![PgValue::Int(1), PgValue::Bytes(b"not an array".to_vec())]);

    let mut scope = QueryScope::new("SELECT id, tags FROM accounts");
    let mut accounts: Vec<Account> = Vec::new();
    let result = fetch(
        &executor,
        &mut scope,
        Destination::Sequence(&mut accounts),
    )
    .await;

    assert!(matches!(result, Err(FetchError::Bind { ref column, .. }) if column == "tags"));
    assert_eq!(accounts.len(), 1);
}

// ========================================
// Hooks and destination shapes
// ========================================

#[tokio::test]
async fn test_on_loaded_invoked_once_per_element() {
    let mut executor = account_executor();
    for i in 0..3 {
        executor.push_row(vec![
            PgValue::Int(i),
            PgValue::Text(format!("user{i}")),
            PgValue::Float(0.0),
        ]);
    }

    let mut scope = QueryScope::new("SELECT * FROM accounts");
    let accounts: Vec<Account> = fetch_all(&executor, &mut scope).await.unwrap();

    assert!(accounts.iter().all(|a| a.load_count == 1));
}

#[tokio::test]
async fn test_boxed_sequence_appends_in_arrival_order() {
    let mut executor = account_executor();
    executor.push_row(vec![
        PgValue::Int(10),
        PgValue::Text("ida".into()),
        PgValue::Float(0.0),
    ]);
    executor.push_row(vec![
        PgValue::Int(20),
        PgValue::Text("joan".into()),
        PgValue::Float(0.0),
    ]);

    let mut scope = QueryScope::new("SELECT * FROM accounts");
    let accounts: Vec<Box<Account>> = fetch_all_boxed(&executor, &mut scope).await.unwrap();

    assert_eq!(accounts[0].id, 10);
    assert_eq!(accounts[1].id, 20);
}

#[tokio::test]
async fn test_null_scalar_leaves_field_default() {
    let mut executor = account_executor();
    executor.push_row(vec![PgValue::Int(1), PgValue::Null, PgValue::Null]);

    let mut scope = QueryScope::new("SELECT * FROM accounts");
    let accounts: Vec<Account> = fetch_all(&executor, &mut scope).await.unwrap();

    assert_eq!(accounts[0].user_name, "");
    assert_eq!(accounts[0].balance, 0.0);
    assert!(!scope.has_errors());
}

// ========================================
// Scope
// ========================================

#[test]
fn test_scope_prepares_sequence_params_as_literals() {
    let scope = QueryScope::new("INSERT INTO accounts (tags) VALUES ($1)")
        .bind(PgValue::TextSeq(vec!["a".to_string(), "b".to_string()]));

    assert_eq!(
        scope.prepared_params(),
        vec![PgValue::Text("{\"a\",\"b\"}".to_string())]
    );
}

#[test]
fn test_scope_records_errors_in_arrival_order() {
    let mut scope = QueryScope::new("SELECT 1");
    scope.record_error(FetchError::NotFound);
    scope.record_error(FetchError::Execution("late".into()));

    assert!(scope.has_errors());
    assert_eq!(scope.first_error(), Some(FetchError::NotFound));
    assert_eq!(scope.errors().len(), 2);
}
