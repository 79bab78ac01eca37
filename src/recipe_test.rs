#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn parse_known_tags() {
    for kind in EquipmentKind::ALL {
        assert_eq!(kind.tag().parse::<EquipmentKind>().unwrap(), kind);
    }
}

#[test]
fn parse_unknown_tag_is_unknown_kind() {
    let err = "bulldozer".parse::<EquipmentKind>().unwrap_err();
    assert_eq!(err, PlacementError::UnknownKind("bulldozer".into()));
}

#[test]
fn parse_is_case_sensitive_and_rejects_empty() {
    assert!("Crane".parse::<EquipmentKind>().is_err());
    assert!("".parse::<EquipmentKind>().is_err());
}

#[test]
fn serde_uses_lowercase_tags() {
    assert_eq!(serde_json::to_string(&EquipmentKind::Scaffold).unwrap(), "\"scaffold\"");
}

#[test]
fn display_names() {
    assert_eq!(EquipmentKind::Crane.display_name(), "Tower crane");
    assert_eq!(EquipmentKind::Scaffold.display_name(), "Scaffold");
    assert_eq!(EquipmentKind::Container.display_name(), "Container");
}

#[test]
fn geometry_is_deterministic_per_kind() {
    for kind in EquipmentKind::ALL {
        assert_eq!(kind.geometry(), kind.geometry());
        assert_eq!(kind.geometry().kind, kind);
    }
}

#[test]
fn kinds_have_distinct_geometry() {
    assert_ne!(EquipmentKind::Crane.geometry(), EquipmentKind::Container.geometry());
    assert_ne!(EquipmentKind::Crane.geometry(), EquipmentKind::Scaffold.geometry());
}

#[test]
fn crane_has_base_mast_and_jib() {
    let g = EquipmentKind::Crane.geometry();
    let names: Vec<_> = g.parts.iter().map(|p| p.name).collect();
    assert_eq!(names, ["base", "mast", "jib"]);
    assert_eq!(g.parts[2].fill, Some(Rgb::BLUE));
}

#[test]
fn scaffold_is_five_outline_bays() {
    let g = EquipmentKind::Scaffold.geometry();
    assert_eq!(g.parts.len(), 5);
    assert!(g.parts.iter().all(|p| p.fill.is_none() && p.stroke.is_some()));
    assert_eq!(g.parts[4].max.y, 75.0);
}

#[test]
fn every_recipe_stands_on_the_ground() {
    for kind in EquipmentKind::ALL {
        let (lo, hi) = kind.geometry().bounds();
        assert_eq!(lo.y, 0.0, "{kind}");
        assert!(hi.y > 0.0);
    }
}

#[test]
fn container_bounds() {
    let (lo, hi) = EquipmentKind::Container.geometry().bounds();
    assert_eq!(lo, DVec3::new(-40.0, 0.0, -15.0));
    assert_eq!(hi, DVec3::new(40.0, 30.0, 15.0));
}

#[test]
fn part_corners_are_offset_by_origin() {
    let g = EquipmentKind::Container.geometry();
    let corners = g.parts[0].corners(DVec3::new(100.0, 0.0, 0.0));
    assert_eq!(corners[0], DVec3::new(60.0, 0.0, -15.0));
    assert_eq!(corners[6], DVec3::new(140.0, 30.0, 15.0));
}
