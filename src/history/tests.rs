//! Unit tests for the history module.

use crate::layer::{ImageFilters, Layer};

use super::*;

fn title() -> Layer {
    Layer::text("Title", "Hello")
}

fn moved(layer: &Layer, x: f64, y: f64) -> Layer {
    let mut layer = layer.clone();
    layer.base_mut().x = x;
    layer.base_mut().y = y;
    layer
}

// Classifier tests
#[test]
fn test_classify_identical_is_unknown() {
    let layers = vec![title(), Layer::shape("Box", "rectangle")];
    let result = classify(&layers, &layers, Some("x"), Some("x"));
    assert_eq!(result.action, ActionType::Unknown);
    assert_eq!(result.description, "Change applied");

    let empty = classify(&[], &[], None, None);
    assert_eq!(empty.action, ActionType::Unknown);
}

#[test]
fn test_classify_added_text_names_layer() {
    let base = vec![Layer::shape("Box", "rectangle")];
    let mut next = base.clone();
    next.push(title());
    let result = classify(&base, &next, None, None);
    assert_eq!(result.action, ActionType::TextAdd);
    assert!(result.description.contains("Title"));
}

#[test]
fn test_classify_added_image_and_shape() {
    let image = classify(&[], &[Layer::image("Photo", None)], None, None);
    assert_eq!(image.action, ActionType::ImageAdd);
    let shape = classify(&[], &[Layer::shape("Badge", "seal")], None, None);
    assert_eq!(shape.action, ActionType::ShapeAdd);
    assert!(shape.description.contains("Badge"));
}

#[test]
fn test_classify_add_wins_over_selection_change() {
    let layer = title();
    let result = classify(&[], std::slice::from_ref(&layer), None, Some(layer.id()));
    assert_eq!(result.action, ActionType::TextAdd);
}

#[test]
fn test_classify_delete() {
    let a = title();
    let b = Layer::shape("Box", "rectangle");
    let result = classify(&[a.clone(), b], &[a], None, None);
    assert_eq!(result.action, ActionType::LayerDelete);
    assert!(result.description.contains("Box"));
}

#[test]
fn test_classify_move() {
    let a = title();
    let result = classify(&[a.clone()], &[moved(&a, 10.0, 20.0)], None, None);
    assert_eq!(result.action, ActionType::LayerMove);
    assert!(result.description.contains("Title"));
}

#[test]
fn test_classify_resize() {
    let a = title();
    let mut b = a.clone();
    b.base_mut().width = 10.0;
    assert_eq!(classify(&[a], &[b], None, None).action, ActionType::LayerResize);
}

#[test]
fn test_classify_rotation_modulo_360() {
    let a = title();
    let mut full_turn = a.clone();
    full_turn.base_mut().rotation = 360.0;
    assert_eq!(
        classify(&[a.clone()], &[full_turn], None, None).action,
        ActionType::Unknown
    );

    let mut tilted = a.clone();
    tilted.base_mut().rotation = 15.0;
    assert_eq!(classify(&[a], &[tilted], None, None).action, ActionType::LayerRotate);
}

#[test]
fn test_classify_text_edit() {
    let a = title();
    let mut b = a.clone();
    b.as_text_mut().unwrap().text = "Goodbye".to_string();
    assert_eq!(classify(&[a], &[b], None, None).action, ActionType::TextEdit);
}

#[test]
fn test_classify_filter_apply() {
    let a = Layer::image("Photo", Some("photo.jpg".to_string()));
    let mut b = a.clone();
    b.as_image_mut().unwrap().filters = Some(ImageFilters {
        brightness: 120.0,
        ..ImageFilters::default()
    });
    assert_eq!(classify(&[a], &[b], None, None).action, ActionType::FilterApply);
}

#[test]
fn test_classify_opacity_is_layer_property() {
    let a = Layer::shape("Box", "rectangle");
    let mut b = a.clone();
    b.base_mut().opacity = Some(0.5);
    assert_eq!(classify(&[a], &[b], None, None).action, ActionType::LayerProperty);
}

#[test]
fn test_classify_explicit_full_opacity_is_no_change() {
    let a = Layer::shape("Box", "rectangle");
    let mut b = a.clone();
    b.base_mut().opacity = Some(1.0);
    assert_eq!(classify(&[a], &[b], None, None).action, ActionType::Unknown);
}

#[test]
fn test_classify_position_wins_within_layer() {
    let a = title();
    let mut b = moved(&a, 5.0, 5.0);
    b.base_mut().width = 1.0;
    b.base_mut().rotation = 45.0;
    b.as_text_mut().unwrap().text = "changed".to_string();
    assert_eq!(classify(&[a], &[b], None, None).action, ActionType::LayerMove);
}

#[test]
fn test_classify_first_differing_layer_in_next_order_wins() {
    let a = title();
    let b = Layer::shape("Box", "rectangle");
    let mut a2 = a.clone();
    a2.base_mut().opacity = Some(0.2);
    let b2 = moved(&b, 3.0, 3.0);

    let result = classify(&[a.clone(), b.clone()], &[b2.clone(), a2.clone()], None, None);
    assert_eq!(result.action, ActionType::LayerMove);
    assert!(result.description.contains("Box"));

    let result = classify(&[a, b], &[a2, b2], None, None);
    assert_eq!(result.action, ActionType::LayerProperty);
    assert!(result.description.contains("Title"));
}

#[test]
fn test_classify_untracked_field_change_is_unknown() {
    let a = title();
    let mut b = a.clone();
    b.as_text_mut().unwrap().color = "#ff0000".to_string();
    assert_eq!(classify(&[a], &[b], None, None).action, ActionType::Unknown);
}

#[test]
fn test_classify_identical_snapshot_with_nan_is_unknown() {
    let mut a = title();
    a.base_mut().x = f64::NAN;
    a.base_mut().opacity = Some(f64::NAN);
    let layers = vec![a, Layer::shape("Box", "rectangle")];
    assert_eq!(
        classify(&layers, &layers, None, None).action,
        ActionType::Unknown
    );

    let mut next = layers.clone();
    next[1].base_mut().width = 10.0;
    let result = classify(&layers, &next, None, None);
    assert_eq!(result.action, ActionType::LayerResize);
    assert!(result.description.contains("Box"));
}

#[test]
fn test_commit_rejects_non_finite_geometry() {
    let mut engine = HistoryEngine::default();
    let mut a = title();
    a.base_mut().y = f64::INFINITY;
    assert!(matches!(
        engine.commit(&[a], None),
        Err(HistoryError::InvalidSnapshot(_))
    ));
    assert_eq!(engine.len(), 1);
}

#[test]
fn test_classify_selection_change() {
    let a = title();
    let result = classify(&[a.clone()], &[a.clone()], None, Some(a.id()));
    assert_eq!(result.action, ActionType::LayerProperty);
    assert_eq!(result.description, "Selection changed");
}

#[test]
fn test_classify_layer_edit_wins_over_selection() {
    let a = title();
    let result = classify(&[a.clone()], &[moved(&a, 1.0, 0.0)], None, Some(a.id()));
    assert_eq!(result.action, ActionType::LayerMove);
}

#[test]
fn test_action_type_strings_and_icons() {
    assert_eq!(ActionType::TextAdd.to_string(), "text-add");
    assert_eq!(ActionType::LayerDelete.as_str(), "layer-delete");
    assert_eq!(ActionType::FilterApply.as_str(), "filter-apply");
    assert!(!ActionType::Unknown.icon().is_empty());
}

// Engine tests
#[test]
fn test_engine_starts_with_initial_entry() {
    let engine = HistoryEngine::default();
    assert_eq!(engine.len(), 1);
    assert_eq!(engine.cursor(), 0);
    assert_eq!(engine.current().action(), ActionType::Initial);
    assert!(!engine.can_undo());
    assert!(!engine.can_redo());
}

#[test]
fn test_undo_at_initial_is_noop() {
    let seed = vec![title()];
    let mut engine = HistoryEngine::new(&seed, None);
    assert!(engine.undo().is_none());
    assert_eq!(engine.cursor(), 0);
    assert_eq!(engine.current().layers(), seed.as_slice());
}

#[test]
fn test_redo_at_end_is_noop() {
    let mut engine = HistoryEngine::default();
    engine.commit(&[title()], None).unwrap();
    assert!(engine.redo().is_none());
    assert_eq!(engine.cursor(), 1);
}

#[test]
fn test_commit_after_undo_discards_redo_branch() {
    let mut engine = HistoryEngine::default();
    let a = title();
    engine.commit(std::slice::from_ref(&a), None).unwrap();
    engine.commit(&[moved(&a, 1.0, 1.0)], None).unwrap();
    assert!(engine.undo().is_some());
    engine.commit(&[moved(&a, 2.0, 2.0)], None).unwrap();

    assert!(engine.redo().is_none());
    assert_eq!(engine.len(), 3);
    assert_eq!(engine.cursor(), 2);
}

#[test]
fn test_commit_rejects_duplicate_ids_and_keeps_history() {
    let mut engine = HistoryEngine::default();
    let a = title();
    engine.commit(std::slice::from_ref(&a), None).unwrap();

    let err = engine.commit(&[a.clone(), a.clone()], None).unwrap_err();
    assert!(matches!(err, HistoryError::InvalidSnapshot(_)));
    assert_eq!(engine.len(), 2);
    assert_eq!(engine.cursor(), 1);
}

#[test]
fn test_commit_rejects_negative_size() {
    let mut engine = HistoryEngine::default();
    let mut a = title();
    a.base_mut().width = -5.0;
    assert!(engine.commit(&[a], None).is_err());
    assert_eq!(engine.len(), 1);
}

#[test]
fn test_snapshots_are_independent_copies() {
    let mut engine = HistoryEngine::default();
    let mut live = vec![title()];
    engine.commit(&live, None).unwrap();
    live[0].base_mut().x = 999.0;
    assert_eq!(engine.current().layers()[0].base().x, 0.0);
}

#[test]
fn test_selection_is_restored_on_undo() {
    let mut engine = HistoryEngine::default();
    let a = title();
    engine.commit(std::slice::from_ref(&a), None).unwrap();
    engine.commit(std::slice::from_ref(&a), Some(a.id())).unwrap();
    assert_eq!(engine.current().action(), ActionType::LayerProperty);

    let restored = engine.undo().unwrap();
    assert_eq!(restored.selected(), None);
    let restored = engine.redo().unwrap();
    assert_eq!(restored.selected(), Some(a.id()));
}

#[test]
fn test_jump_to() {
    let mut engine = HistoryEngine::default();
    let a = title();
    engine.commit(std::slice::from_ref(&a), None).unwrap();
    engine.commit(&[moved(&a, 4.0, 4.0)], None).unwrap();

    assert_eq!(engine.jump_to(0).unwrap().action(), ActionType::Initial);
    assert!(engine.can_redo());
    assert!(engine.jump_to(3).is_none());
    assert_eq!(engine.cursor(), 0);
}

#[test]
fn test_reset_starts_fresh() {
    let mut engine = HistoryEngine::default();
    engine.commit(&[title()], None).unwrap();
    let seed = vec![Layer::shape("Box", "rectangle")];
    engine.reset(&seed, None);
    assert_eq!(engine.len(), 1);
    assert_eq!(engine.current().action(), ActionType::Initial);
    assert_eq!(engine.current().layers(), seed.as_slice());
}

#[test]
fn test_max_entries_drops_oldest() {
    let mut engine = HistoryEngine::default().with_max_entries(Some(3));
    let a = title();
    for i in 0..5 {
        engine.commit(&[moved(&a, i as f64, 0.0)], None).unwrap();
    }
    assert_eq!(engine.len(), 3);
    assert_eq!(engine.cursor(), 2);
    assert_eq!(engine.current().layers()[0].base().x, 4.0);

    // Oldest survivor is the new floor
    assert!(engine.undo().is_some());
    assert!(engine.undo().is_some());
    assert!(engine.undo().is_none());
    assert_eq!(engine.current().layers()[0].base().x, 2.0);
}

#[test]
fn test_entry_ids_increase() {
    let mut engine = HistoryEngine::default();
    let a = title();
    let first = engine.commit(std::slice::from_ref(&a), None).unwrap().id();
    let second = engine.commit(&[moved(&a, 1.0, 0.0)], None).unwrap().id();
    assert!(second > first);
}

#[test]
fn test_entry_label_has_icon() {
    let mut engine = HistoryEngine::default();
    let entry = engine.commit(&[title()], None).unwrap();
    assert_eq!(entry.label(), format!("{} Add text \"Title\"", ActionType::TextAdd.icon()));
}

/// Add "Title", move it, undo, add "Badge": the move is gone for good.
#[test]
fn test_add_move_undo_add_scenario() {
    let mut engine = HistoryEngine::default();
    let title = title();

    let entry = engine.commit(std::slice::from_ref(&title), None).unwrap();
    assert_eq!(entry.action(), ActionType::TextAdd);
    assert!(entry.description().contains("Title"));
    assert_eq!(engine.len(), 2);
    assert_eq!(engine.cursor(), 1);

    let entry = engine.commit(&[moved(&title, 10.0, 20.0)], None).unwrap();
    assert_eq!(entry.action(), ActionType::LayerMove);
    assert_eq!(engine.len(), 3);
    assert_eq!(engine.cursor(), 2);

    let restored = engine.undo().unwrap();
    assert_eq!(restored.layers(), std::slice::from_ref(&title));
    assert_eq!(engine.cursor(), 1);

    let badge = Layer::shape("Badge", "seal");
    let entry = engine
        .commit(&[title.clone(), badge], None)
        .unwrap();
    assert_eq!(entry.action(), ActionType::ShapeAdd);
    assert_eq!(engine.len(), 3);
    assert_eq!(engine.cursor(), 2);
    assert!(engine.redo().is_none());

    let actions: Vec<ActionType> = engine.entries().iter().map(|e| e.action()).collect();
    assert_eq!(
        actions,
        vec![ActionType::Initial, ActionType::TextAdd, ActionType::ShapeAdd]
    );
}
