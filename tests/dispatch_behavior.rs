//! Behavior-driven tests for command dispatch
//!
//! These tests verify HOW paths resolve through the assembled router tree,
//! how the runner picks fetchers, and what callers get back.

use ferrocart_core::{CommandSpec, DispatchError, Parameters, QueryParams, Router};
use ferrocart_tests::{
    demo_runner, root_router, CommandRunner, Platform, PlatformConfig, ProviderInfo,
    ProviderRegistry,
};
use serde_json::json;

// =============================================================================
// Router: path composition
// =============================================================================

#[test]
fn when_router_is_mounted_its_commands_resolve_only_at_the_composed_path() {
    // Given: /b with command c, mounted under /a
    let child = Router::new("/b").with_command(CommandSpec::new("c"));
    let parent = Router::new("/a").with_router(child);

    // When: The tree is flattened
    let table = parent.flatten();

    // Then: Only /a/b/c exists
    assert_eq!(table.paths(), vec!["/a/b/c"]);
    assert!(table.get("/b/c").is_none());
}

#[test]
fn when_listing_commands_paths_are_sorted_unique_and_match_the_table() {
    // Given: The full extension tree
    let runner = demo_runner();

    // When: Commands are listed
    let listed = runner.list_commands();

    // Then: The list is sorted, duplicate-free and equal to the table keys
    let mut sorted = listed.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(listed, sorted);
    assert_eq!(listed, root_router().flatten().paths());
    assert_eq!(listed.len(), 35);
}

#[test]
fn when_siblings_register_the_same_name_both_resolve_independently() {
    // Given: /orders/summary and /orders/returns/summary
    let runner = demo_runner();

    // When/Then: Each path carries its own model
    assert_eq!(
        runner.command("/orders/summary").and_then(|info| info.model()),
        Some("OrderSummary")
    );
    assert_eq!(
        runner.command("/orders/returns/summary").and_then(|info| info.model()),
        Some("ReturnsSummary")
    );
}

// =============================================================================
// Runner: successful dispatch
// =============================================================================

#[tokio::test]
async fn when_running_orders_summary_on_demo_envelope_carries_provenance() {
    // Given: The demo provider and the extension tree
    let runner = demo_runner();

    // When: /orders/summary runs with no params
    let envelope = runner
        .run("/orders/summary", "demo", Parameters::new())
        .await
        .expect("dispatch should succeed");

    // Then: Provenance and the 30-day window are reported
    assert_eq!(envelope.provider(), "demo");
    assert_eq!(envelope.model(), "OrderSummary");
    assert_eq!(envelope.command(), "/orders/summary");
    assert_eq!(envelope.len(), 30);
    assert!(envelope.warnings().is_empty());
}

#[tokio::test]
async fn when_running_a_command_results_equal_transform_of_fetch() {
    // Given: The fetcher the registry resolves for the command's model
    let runner = demo_runner();
    let mut params = Parameters::new();
    params.insert(String::from("days"), json!(5));
    params.insert(String::from("channel"), json!("email"));
    let fetcher = runner
        .registry()
        .get_fetcher("demo", "CampaignPerformance")
        .expect("registered fetcher");

    // When: The runner executes the command and the fetcher is called directly
    let envelope = runner
        .run("/marketing/campaigns/performance", "demo", params.clone())
        .await
        .expect("dispatch should succeed");
    let query = QueryParams::from_values("demo", params);
    let raw = fetcher.fetch(&query).await.expect("fetch");
    let direct = fetcher.transform(raw, &query).expect("transform");

    // Then: Both paths yield the same records
    let via_runner = envelope.to_dict().expect("dict");
    let via_fetcher = direct
        .iter()
        .map(|record| record.to_value().expect("serializable"))
        .collect::<Vec<_>>();
    assert_eq!(via_runner, via_fetcher);
    assert_eq!(via_runner.len(), 5);
}

#[tokio::test]
async fn when_params_include_provider_the_explicit_argument_wins() {
    // Given: Params that name a different provider
    let runner = demo_runner();
    let mut params = Parameters::new();
    params.insert(String::from("provider"), json!("shopify"));

    // When: The runner is told to use demo
    let envelope = runner
        .run("/customers/segments/rfm", "demo", params)
        .await
        .expect("demo should answer");

    // Then: demo answered
    assert_eq!(envelope.provider(), "demo");
    assert_eq!(envelope.len(), 6);
}

// =============================================================================
// Registry behavior
// =============================================================================

#[test]
fn when_a_provider_is_registered_twice_the_listing_is_unchanged() {
    // Given: A registry holding demo
    let mut registry = ProviderRegistry::new();
    registry.register(ferrocart_demo::provider());
    let before = registry.list_providers();

    // When: demo is registered again
    registry.register(ferrocart_demo::provider());

    // Then: Nothing changes
    assert_eq!(registry.list_providers(), before);
}

#[test]
fn when_model_is_unknown_only_that_providers_models_are_listed() {
    // Given: demo plus a second provider with a distinct model
    let mut registry = ProviderRegistry::new();
    registry.register(ferrocart_demo::provider());
    registry.register(ProviderInfo::new("empty"));

    // When: An unknown model is requested from each
    let demo_error = registry.get_fetcher("demo", "NoSuchModel").err().expect("unknown model");
    let empty_error = registry.get_fetcher("empty", "NoSuchModel").err().expect("unknown model");

    // Then: Each lists its own models, the empty one renders an empty list
    assert_eq!(demo_error.available().len(), 24);
    assert!(demo_error.available().contains(&String::from("OrderSummary")));
    assert!(empty_error.to_string().ends_with("Available: "));
}

// =============================================================================
// Concurrency
// =============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn when_many_callers_share_a_runner_all_succeed_without_locks() {
    // Given: One runner cloned into many tasks
    let runner = demo_runner();
    let paths = runner.list_commands();

    // When: Every command runs concurrently
    let mut tasks = tokio::task::JoinSet::new();
    for path in paths.clone() {
        let runner = runner.clone();
        tasks.spawn(async move {
            let envelope = runner.run(&path, "demo", Parameters::new()).await;
            (path, envelope)
        });
    }

    // Then: Every command answers with its own path
    let mut completed = 0;
    while let Some(joined) = tasks.join_next().await {
        let (path, envelope) = joined.expect("task should not panic");
        let envelope = envelope.unwrap_or_else(|error| panic!("{path} failed: {error}"));
        assert_eq!(envelope.command(), path);
        completed += 1;
    }
    assert_eq!(completed, paths.len());
}

#[tokio::test]
async fn when_platform_is_assembled_system_status_is_answered_by_its_handler() {
    // Given: The full platform
    let platform = Platform::assemble(PlatformConfig::default());

    // When: /system/status runs against a provider that does not exist
    let envelope = platform
        .execute("/system/status", Some("nobody"), Parameters::new())
        .await
        .expect("handler command ignores provider resolution");

    // Then: The handler answered
    assert_eq!(envelope.model(), "SystemStatus");
    assert_eq!(envelope.len(), 1);
    let status = &envelope.to_dict().expect("dict")[0];
    assert_eq!(status["commands"], json!(36));
}

#[tokio::test]
async fn when_path_is_unknown_dispatch_fails_before_any_provider_lookup() {
    // Given: A runner with no providers at all
    let runner = CommandRunner::new(root_router(), ProviderRegistry::new());

    // When: An unknown path runs
    let error = runner
        .run("/does/not/exist", "demo", Parameters::new())
        .await
        .expect_err("unknown path");

    // Then: CommandNotFound wins over ProviderNotFound
    assert!(matches!(error, DispatchError::CommandNotFound { .. }));
}
