use alertflow_hierarchy::*;
use alertflow_model::{sample_records, LevelOrder};

#[test]
fn test_build_layout_matches_manual_pipeline() {
    let records = sample_records();
    let filters = FilterSelection::from_pairs([("project", "Fraud")]).unwrap();
    let options = LayoutOptions::default();

    let roots = aggregate(&project(&records, &filters));
    let expanded = ExpandedSet::all(&roots);
    let manual = layout(&roots, &options, &expanded);

    let built = build_layout(&records, &filters, &LevelOrder::canonical(), &expanded, &options).unwrap();
    assert_eq!(built, manual);
}

#[test]
fn test_build_layout_rejects_bad_options() {
    let options = LayoutOptions {
        column_width: -1.0,
        ..Default::default()
    };
    let result = build_layout(
        &sample_records(),
        &FilterSelection::new(),
        &LevelOrder::canonical(),
        &ExpandedSet::new(),
        &options,
    );
    assert!(matches!(result, Err(HierarchyError::InvalidLayout(_))));
}

#[test]
fn test_cache_hit_returns_identical_layout() {
    let records = sample_records();
    let filters = FilterSelection::new();
    let order = LevelOrder::canonical();
    let options = LayoutOptions::default();
    let expanded = ExpandedSet::all(&aggregate(&records));

    let mut cache = LayoutCache::new();
    let first = cache.get_or_compute(&records, &filters, &order, &expanded, &options).unwrap();
    let second = cache.get_or_compute(&records, &filters, &order, &expanded, &options).unwrap();
    assert_eq!(first, second);
    assert_eq!(cache.hits(), 1);
    assert_eq!(cache.misses(), 1);
}

#[test]
fn test_cache_recomputes_on_expand_change() {
    let records = sample_records();
    let filters = FilterSelection::new();
    let order = LevelOrder::canonical();
    let options = LayoutOptions::default();
    let mut expanded = ExpandedSet::new();

    let mut cache = LayoutCache::new();
    let collapsed = cache.get_or_compute(&records, &filters, &order, &expanded, &options).unwrap();

    let roots = aggregate(&records);
    expanded.toggle(roots[0].id.clone());
    let opened = cache.get_or_compute(&records, &filters, &order, &expanded, &options).unwrap();

    assert_eq!(cache.misses(), 2);
    assert!(opened.nodes.len() > collapsed.nodes.len());
    assert_eq!(
        opened,
        build_layout(&records, &filters, &order, &expanded, &options).unwrap()
    );
}

#[test]
fn test_invalidate_forces_recompute() {
    let records = sample_records();
    let mut cache = LayoutCache::new();
    let args = (
        FilterSelection::new(),
        LevelOrder::canonical(),
        ExpandedSet::new(),
        LayoutOptions::default(),
    );
    cache.get_or_compute(&records, &args.0, &args.1, &args.2, &args.3).unwrap();
    cache.invalidate();
    cache.get_or_compute(&records, &args.0, &args.1, &args.2, &args.3).unwrap();
    assert_eq!(cache.hits(), 0);
    assert_eq!(cache.misses(), 2);
}

#[test]
fn test_cache_recomputes_on_search_change() {
    let records = sample_records();
    let order = LevelOrder::canonical();
    let options = LayoutOptions::default();
    let expanded = ExpandedSet::new();
    let mut filters = FilterSelection::new();

    let mut cache = LayoutCache::new();
    let all = cache.get_or_compute(&records, &filters, &order, &expanded, &options).unwrap();
    filters.set_search("kyc");
    let kyc = cache.get_or_compute(&records, &filters, &order, &expanded, &options).unwrap();

    assert_eq!(cache.misses(), 2);
    assert_eq!(all.nodes.len(), 5);
    assert_eq!(kyc.nodes.len(), 1);
    assert_eq!(kyc.nodes[0].label, "KYC");
}
