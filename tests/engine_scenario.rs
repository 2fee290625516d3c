use gpui_grapher::{
    Color, FunctionList, Graph, GraphError, Point, RenderCommand, RenderList, ScreenPoint,
    Surface, SurfaceSize,
};

fn graph() -> Graph<RenderList> {
    Graph::new(RenderList::new(SurfaceSize::new(800.0, 600.0)))
}

#[test]
fn identity_on_default_canvas() {
    let mut graph = graph();
    graph.initialize().expect("initialize");
    assert_eq!(graph.center(), Some(ScreenPoint::new(400.0, 300.0)));
    assert_eq!(graph.square_size(), 42.0);

    let red = Color::parse("#ff0000").expect("color");
    let points = graph.draw_graph("x", red, "R").expect("draw");
    assert!(!points.is_empty());
    assert!(points.iter().all(|point| point.y == -point.x));
    let first = points.first().copied().expect("points");
    let last = points.last().copied().expect("points");
    assert!(first.x <= -9.0);
    assert!(last.x >= 9.0);

    graph.move_graph(100.0, 0.0).expect("move");
    assert_eq!(graph.center(), Some(ScreenPoint::new(500.0, 300.0)));
    let curves: Vec<&[ScreenPoint]> = graph
        .surface()
        .paths()
        .filter(|(_, style)| style.color == red)
        .map(|(points, _)| points)
        .collect();
    assert_eq!(curves.len(), 1);
    let curve = curves[0];
    assert!(curve.len() > 1);
    // y = x through the shifted origin: screen (500 + 42x, 300 - 42x).
    assert!(curve
        .iter()
        .all(|point| (point.x + point.y - 800.0).abs() < 1e-6));
    assert!(curve.contains(&ScreenPoint::new(500.0, 300.0)));
    assert!(curve.contains(&ScreenPoint::new(542.0, 258.0)));
    assert!(curve.iter().any(|point| point.x < 100.0));
}

#[test]
fn pan_zoom_round_trip() {
    let mut graph = graph();
    graph.initialize().expect("initialize");
    let pivot = ScreenPoint::new(620.0, 140.0);
    let before = graph.to_logical(pivot).expect("initialized");

    graph.zoom_graph(30.0, Some(pivot)).expect("zoom in");
    graph.move_graph(-80.0, 45.0).expect("pan");
    graph.move_graph(80.0, -45.0).expect("pan back");
    graph.zoom_graph(-30.0, Some(pivot)).expect("zoom out");

    let after = graph.to_logical(pivot).expect("initialized");
    assert!((before.x - after.x).abs() < 1e-9);
    assert!((before.y - after.y).abs() < 1e-9);
    assert_eq!(graph.square_size(), 42.0);
}

#[test]
fn rejected_zoom_keeps_scene() {
    let mut graph = graph();
    graph.initialize().expect("initialize");
    graph.draw_graph("x^2", Color::BLACK, "R").expect("draw");
    let scene = graph.surface().commands().to_vec();
    assert!(matches!(
        graph.zoom_graph(500.0, None),
        Err(GraphError::ZoomOutOfRange { .. })
    ));
    assert_eq!(graph.surface().commands(), scene.as_slice());
}

#[test]
fn function_list_drives_graph() {
    let mut graph = graph();
    graph.initialize().expect("initialize");
    let mut functions = FunctionList::new();
    let line = functions.add("x", Color::BLACK);
    functions.add_with_interval("sqrt(x)", Color::WHITE, "[0; 4]");
    functions.sync(&mut graph).expect("sync");
    assert_eq!(graph.functions().len(), 2);

    let sqrt = graph.functions()[1].points().expect("sampled");
    assert!(sqrt.iter().all(|point| (0.0..=4.0).contains(&point.x)));
    assert!(sqrt.contains(&Point::new(4.0, -2.0)));

    functions.toggle(line);
    functions.sync(&mut graph).expect("sync");
    assert_eq!(graph.functions().len(), 1);
    assert_eq!(graph.functions()[0].expression(), "sqrt(x)");

    graph.clear_graph().expect("clear");
    assert!(graph.functions().is_empty());
    assert!(
        !graph
            .surface()
            .commands()
            .iter()
            .any(|command| matches!(command, RenderCommand::Path { style, .. } if style.width == 3.0))
    );
    assert_eq!(graph.surface().size(), SurfaceSize::new(800.0, 600.0));
}
