use std::fs::File;
use std::path::Path;

use spool_trays::{
    build_component, Component, GeometryBackend, SpoolDimensions, SpoolProfile, TrayStyle,
    VcadBackend, WedgeAngle,
};
use tempfile::TempDir;

fn example_spool() -> SpoolProfile {
    SpoolProfile::new("ExampleSpool", SpoolDimensions::new(30.0, 70.0, 55.0)).unwrap()
}

fn export(component: Component, dir: &Path) -> stl_io::IndexedMesh {
    let backend = VcadBackend;
    let solid = build_component(
        &backend,
        &example_spool(),
        WedgeAngle::from_count(6).unwrap(),
        &TrayStyle::default(),
        component,
    )
    .unwrap();

    let path = dir.join(format!("{component}.stl"));
    backend.export(&solid, &path).unwrap();

    let mut file = File::open(&path).unwrap();
    stl_io::read_stl(&mut file).unwrap()
}

fn max_radius(mesh: &stl_io::IndexedMesh) -> f32 {
    mesh.vertices
        .iter()
        .map(|v| (v[0] * v[0] + v[1] * v[1]).sqrt())
        .fold(0.0, f32::max)
}

#[test]
fn test_every_component_stays_inside_flange() {
    let out = TempDir::new().unwrap();
    for component in Component::ALL {
        let mesh = export(component, out.path());
        assert!(!mesh.faces.is_empty(), "{component} produced no triangles");
        let r = max_radius(&mesh);
        assert!(r <= 35.0 + 1e-3, "{component} reaches r={r}");
    }
}

#[test]
fn test_tray_spans_one_sixth() {
    let out = TempDir::new().unwrap();
    let mesh = export(Component::Tray, out.path());

    // Exported centered on -Y, so no angle wraps around ±180°.
    let angles: Vec<f32> = mesh
        .vertices
        .iter()
        .map(|v| v[1].atan2(v[0]).to_degrees())
        .collect();
    let min = angles.iter().copied().fold(f32::INFINITY, f32::min);
    let max = angles.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let span = max - min;

    assert!(span <= 60.0 + 1e-2, "span {span}");
    // Side faces are inset by half the clearance, costing under a degree.
    assert!(span >= 58.0, "span {span}");
}

#[test]
fn test_tray_height() {
    let out = TempDir::new().unwrap();
    let mesh = export(Component::Tray, out.path());
    let top = mesh.vertices.iter().map(|v| v[2]).fold(f32::NEG_INFINITY, f32::max);
    let bottom = mesh.vertices.iter().map(|v| v[2]).fold(f32::INFINITY, f32::min);
    assert!((top - 50.75).abs() < 1e-3, "top {top}");
    assert!(bottom.abs() < 1e-3, "bottom {bottom}");
}
