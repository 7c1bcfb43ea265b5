use super::*;

#[test]
fn default_is_main_timeline() {
    let scope = ExtractionScope::default();
    assert_eq!(scope.auditions, AuditionMask::Active);
    assert_eq!(scope.mc_angles, McAngleMask::Active);
    assert!(!scope.include_disabled);
    assert_eq!(scope.max_container_depth, Some(1));
    assert!(!scope.occlusions.contains(&Occlusion::FullyOccluded));
    assert!(scope.excluded_traversal_kinds.contains(&ElementKind::Resources));
}

#[test]
fn deep_keeps_everything_but_the_resource_table() {
    let scope = ExtractionScope::deep();
    assert_eq!(scope.auditions, AuditionMask::All);
    assert_eq!(scope.mc_angles, McAngleMask::All);
    assert!(scope.include_disabled);
    assert_eq!(scope.occlusions.len(), 3);
    assert_eq!(scope.max_container_depth, None);
    assert_eq!(
        scope.excluded_traversal_kinds.iter().copied().collect::<Vec<_>>(),
        [ElementKind::Resources]
    );
}

#[test]
fn debug_output_hides_predicates() {
    let scope = ExtractionScope::deep().with_traversal_predicate(|_| true);
    let dbg = format!("{scope:?}");
    assert!(dbg.contains("traversal_predicate: true"));
    assert!(dbg.contains("extraction_predicate: false"));
}

#[test]
fn scope_def_overrides_preset() {
    let scope = ScopeDef::from_json_str(
        r#"{
            "preset": "deep",
            "include_disabled": false,
            "occlusions": ["not_occluded"],
            "max_container_depth": 2,
            "exclude_traversal": ["audition"],
            "exclude_extraction": ["marker", "chapter-marker"]
        }"#,
    )
    .unwrap()
    .into_scope()
    .unwrap();

    assert_eq!(scope.auditions, AuditionMask::All);
    assert!(!scope.include_disabled);
    assert_eq!(
        scope.occlusions.iter().copied().collect::<Vec<_>>(),
        [Occlusion::NotOccluded]
    );
    assert_eq!(scope.max_container_depth, Some(2));
    assert!(scope.excluded_traversal_kinds.contains(&ElementKind::Resources));
    assert!(scope.excluded_traversal_kinds.contains(&ElementKind::Audition));
    assert_eq!(scope.excluded_extraction_kinds.len(), 2);
}

#[test]
fn explicit_null_depth_is_unlimited() {
    let def = ScopeDef::from_json_str(r#"{ "max_container_depth": null }"#).unwrap();
    assert_eq!(def.max_container_depth, Some(None));
    assert_eq!(def.into_scope().unwrap().max_container_depth, None);

    let def = ScopeDef::from_json_str("{}").unwrap();
    assert_eq!(def, ScopeDef::default());
    assert_eq!(def.into_scope().unwrap().max_container_depth, Some(1));
}

#[test]
fn unknown_kind_is_rejected() {
    let err = ScopeDef::from_json_str(r#"{ "exclude_traversal": ["clipp"] }"#)
        .unwrap()
        .into_scope()
        .unwrap_err();
    assert!(matches!(err, ResolveError::Format(_)), "{err}");
}

#[test]
fn empty_occlusion_set_is_rejected() {
    let err = ScopeDef::from_json_str(r#"{ "occlusions": [] }"#)
        .unwrap()
        .into_scope()
        .unwrap_err();
    assert!(matches!(err, ResolveError::Validation(_)));
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = ScopeDef::from_json_str(r#"{ "preset": "everything" }"#).unwrap_err();
    assert!(matches!(err, ResolveError::Serde(_)));
}

#[test]
fn scope_def_serializes_only_overrides() {
    let def = ScopeDef {
        auditions: Some(AuditionMask::All),
        ..ScopeDef::default()
    };
    let json = serde_json::to_value(&def).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "preset": "main_timeline",
            "auditions": "all",
            "exclude_traversal": [],
            "exclude_extraction": []
        })
    );
}
