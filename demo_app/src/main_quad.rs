//! Quad demo
//!
//! Draws an indexed, vertex-colored quad on a blue background. Escape closes
//! the window.

use std::process::ExitCode;

use gx::foundation::logging;
use gx::prelude::*;

const VERTEX_SHADER: &str = r"
#version 460 core
layout(location = 0) in vec3 aPos;
layout(location = 1) in vec4 aColor;

layout(location = 0) out vec4 vColor;

void main() {
    gl_Position = vec4(aPos, 1.0);
    vColor = aColor;
}
";

const FRAGMENT_SHADER: &str = r"
#version 460 core
layout(location = 0) in vec4 vColor;

out vec4 fragColor;

void main() {
    fragColor = vColor;
}
";

/// Position (xyz) followed by color (rgba)
const FLOATS_PER_VERTEX: usize = 7;

fn rgba(r: u8, g: u8, b: u8, a: u8) -> [f32; 4] {
    [f32::from(r) / 255.0, f32::from(g) / 255.0, f32::from(b) / 255.0, f32::from(a) / 255.0]
}

fn vertex(position: [f32; 3], color: [f32; 4]) -> [f32; FLOATS_PER_VERTEX] {
    [position[0], position[1], position[2], color[0], color[1], color[2], color[3]]
}

fn on_key(gx: &mut Gx, window: WindowHandle, event: KeyEvent) {
    if event.is_press(KeyCode::Escape) {
        log::info!("ESC pressed - closing window");
        gx.window_close(window);
    }
}

fn run() -> Result<(), GxError> {
    let context = ContextConfig::load_or_default("gx.toml");
    let mut gx = Gx::init(&context)?;
    gx.create_application(ApplicationOptions::NONE);

    let window = gx.create_window(&WindowConfig::new("GX Test", 800, 600))?;

    let program = gx.compile_program(VERTEX_SHADER, FRAGMENT_SHADER)?;

    let vertices = [
        vertex([-0.5, -0.5, 0.0], rgba(255, 0, 0, 255)),
        vertex([0.5, -0.5, 0.0], rgba(127, 127, 0, 255)),
        vertex([0.5, 0.5, 0.0], rgba(127, 127, 127, 255)),
        vertex([-0.5, 0.5, 0.0], rgba(127, 127, 255, 255)),
    ];
    let indices: [u16; 6] = [0, 1, 2, 2, 3, 0];

    let square = gx.create_render_object_with_elements(
        RenderObjectDescriptor::new(program)
            .with_vertices(BufferData::from_slice(BufferUsage::Static, &vertices))
            .with_elements(BufferData::from_slice(BufferUsage::Static, &indices)),
    )?;

    if let Some(mut ctx) = gx.render_context() {
        let stride = FLOATS_PER_VERTEX * std::mem::size_of::<f32>();
        ctx.bind_object(square);
        ctx.enable_vertex_attribute(square, 0);
        ctx.set_vertex_attribute(square, &VertexAttribute::float(0, 3, stride, 0));
        ctx.enable_vertex_attribute(square, 1);
        ctx.set_vertex_attribute(
            square,
            &VertexAttribute::float(1, 4, stride, 3 * std::mem::size_of::<f32>()),
        );
    }

    gx.add_keyboard_callback(on_key);
    gx.set_draw_callback(window, move |ctx| {
        ctx.update_viewport();
        ctx.set_background(0.2, 0.3, 0.8, 1.0);
        ctx.use_shader(square);
        if let Err(e) = ctx.draw_elements(square, indices.len(), AttributeType::UnsignedShort) {
            log::error!("Failed to draw quad: {}", e);
        }
    });

    gx.exec();
    gx.terminate();
    Ok(())
}

fn main() -> ExitCode {
    logging::init_with_filter("info");
    log::info!("Starting quad demo");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
