use gpui::{AppContext, Application, Bounds, WindowBounds, WindowOptions, px, size};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use gpui_grapher::{Color, FunctionList, GpuiGraphView, GraphViewConfig};

fn main() {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("logging disabled: {err}");
    }

    Application::new().run(|cx| {
        let options = WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(Bounds::centered(
                None,
                size(px(800.0), px(600.0)),
                cx,
            ))),
            ..Default::default()
        };

        cx.open_window(options, |_window, cx| {
            let mut functions = FunctionList::new();
            functions.add("sin(x)", Color::from_rgb8(0xe6, 0x39, 0x46));
            functions.add("x^2 / 4 - 2", Color::from_rgb8(0x1d, 0x35, 0x57));
            functions.add_with_interval("sqrt(x)", Color::from_rgb8(0x2a, 0x9d, 0x8f), "[0; 6]");
            let hidden = functions.add("1/x", Color::from_rgb8(0xf4, 0xa2, 0x61));
            functions.toggle(hidden);

            let config = GraphViewConfig {
                show_readout: true,
                ..Default::default()
            };
            let view = GpuiGraphView::with_config(config);
            // The graph is not initialized until the first frame; the functions
            // are held and drawn then.
            let handle = view.graph_handle();
            if let Err(err) = handle.write(|graph| functions.sync(graph)) {
                tracing::warn!(%err, "could not register functions");
            }
            cx.new(|_| view)
        })
        .unwrap();
    });
}
