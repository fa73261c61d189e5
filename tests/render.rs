//! End-to-end: JSON scene text through parse, render, and encode checks

use raymarcher::objects::{Scene, Shape};
use raymarcher::render::render;
use raymarcher::{Color, Error};

const SCENE: &str = r#"[
    {"type": "camera", "width": 4, "height": 4},
    {"type": "light", "color": [1, 1, 1], "position": [0, 0, -5],
     "radial-a0": 1, "radial-a1": 0, "radial-a2": 0},
    {"type": "sphere", "radius": 1.0, "position": [0, 0, 1.25],
     "diffuse_color": [1, 0, 0], "specular_color": [1, 1, 1]}
]"#;

#[test]
fn sphere_scene_renders_hits_and_misses_where_expected() {
    let scene = Scene::from_json(SCENE).unwrap();
    let buffer = render(&scene, 4, 4);

    // The sphere spans the center rays of the wide camera
    for (x, y) in [(1, 1), (1, 2), (2, 1), (2, 2)] {
        let pixel = buffer.pixel(x, y);
        assert!(pixel[0] > 0.0, "center pixel ({x},{y}) should be lit red");
        assert_eq!(pixel[1], 0.0);
    }
    // Corner rays pass outside it
    for (x, y) in [(0, 0), (0, 3), (3, 0), (3, 3)] {
        assert_eq!(*buffer.pixel(x, y), Color::zeros(), "corner ({x},{y})");
    }
}

#[test]
fn scene_with_every_shape_kind_parses() {
    let scene = Scene::from_json(
        r#"[
        {"type": "camera", "width": 1, "height": 1},
        {"type": "light", "color": [1,1,1], "position": [5, 5, 0]},
        {"type": "sphere", "radius": 1, "position": [0,0,10],
         "diffuse_color": [1,0,0], "specular_color": [1,1,1]},
        {"type": "plane", "normal": [0,1,0], "position": [0,-2,0],
         "diffuse_color": [0,1,0], "specular_color": [1,1,1]},
        {"type": "box", "dimensions": [1,1,1], "position": [3,0,10],
         "rotation": [0, 45, 0],
         "diffuse_color": [0,0,1], "specular_color": [1,1,1]},
        {"type": "donut", "radius": 2, "thickness": 0.5, "position": [-3,0,10],
         "diffuse_color": [1,1,0], "specular_color": [1,1,1]},
        {"type": "cone", "angle": 30, "height": 2, "position": [0,3,10],
         "diffuse_color": [1,0,1], "specular_color": [1,1,1]},
        {"type": "infinite_cylinder", "radius": 0.5, "position": [6,0,10],
         "diffuse_color": [0,1,1], "specular_color": [1,1,1]},
        {"type": "mandelbulb", "position": [0,-6,10],
         "diffuse_color": [1,1,1], "specular_color": [1,1,1],
         "infinite_interval": 20}
    ]"#,
    )
    .unwrap();

    assert_eq!(scene.objects.len(), 7);
    assert!(matches!(scene.objects[0].shape, Shape::Sphere { .. }));
    assert!(matches!(scene.objects[6].shape, Shape::Mandelbulb));
    assert_eq!(scene.objects[6].infinite_interval, 20.0);
}

#[test]
fn malformed_json_surfaces_as_a_parse_error() {
    assert!(matches!(
        Scene::from_json("[{\"type\": \"camera\""),
        Err(Error::Parse(_))
    ));
}

#[test]
fn unknown_object_type_surfaces_as_a_parse_error() {
    assert!(matches!(
        Scene::from_json(r#"[{"type": "teapot", "position": [0,0,0]}]"#),
        Err(Error::Parse(_))
    ));
}
