//! Triangle demo
//!
//! Draws a single triangle from a vertex buffer without indices. The window
//! can be closed with Escape or the title bar button.

use std::process::ExitCode;

use gx::foundation::logging;
use gx::prelude::*;

const VERTEX_SHADER: &str = r"
#version 460 core
layout(location = 0) in vec3 aPos;

void main() {
    gl_Position = vec4(aPos, 1.0);
}
";

const FRAGMENT_SHADER: &str = r"
#version 460 core
out vec4 fragColor;

void main() {
    fragColor = vec4(1.0, 0.5, 0.2, 1.0);
}
";

const VERTICES: [f32; 9] = [
    -0.5, -0.5, 0.0, // left
    0.5, -0.5, 0.0, // right
    0.0, 0.5, 0.0, // top
];

fn on_key(gx: &mut Gx, window: WindowHandle, event: KeyEvent) {
    if event.is_press(KeyCode::Escape) {
        gx.window_close(window);
    }
}

fn run() -> Result<(), GxError> {
    let context = ContextConfig::load_or_default("gx.toml");
    let mut gx = Gx::init(&context)?;
    gx.create_application(ApplicationOptions::NONE);

    let window = gx.create_window(&WindowConfig::new("GX Triangle", 800, 600))?;
    let program = gx.compile_program(VERTEX_SHADER, FRAGMENT_SHADER)?;
    let triangle =
        gx.create_render_object(program, BufferData::from_slice(BufferUsage::Static, &VERTICES))?;

    if let Some(mut ctx) = gx.render_context() {
        ctx.bind_object(triangle);
        ctx.set_vertex_attribute(triangle, &VertexAttribute::float(0, 3, 3 * std::mem::size_of::<f32>(), 0));
        ctx.enable_vertex_attribute(triangle, 0);
    }

    gx.add_keyboard_callback(on_key);
    gx.set_draw_callback(window, move |ctx| {
        ctx.update_viewport();
        ctx.set_background(0.1, 0.1, 0.1, 1.0);
        ctx.use_shader(triangle);
        ctx.draw_vertices(triangle, 0, 3);
    });

    gx.exec();
    gx.terminate();
    Ok(())
}

fn main() -> ExitCode {
    logging::init_with_filter("info");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
