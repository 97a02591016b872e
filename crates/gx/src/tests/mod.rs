//! Context-level tests driven through the recording backends

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::context::Gx;
use crate::render::RenderContext;
use crate::resource::WindowHandle;
use crate::testing::{GpuLog, PlatformLog, RecordingGpu, RecordingPlatform};

mod loop_scenarios;

/// A context over recording backends plus their logs
struct Harness {
    gx: Gx,
    gpu: Rc<RefCell<GpuLog>>,
    platform: Rc<RefCell<PlatformLog>>,
}

fn harness() -> Harness {
    let (platform, platform_log) = RecordingPlatform::new();
    let (gpu, gpu_log) = RecordingGpu::new();
    Harness {
        gx: Gx::with_backends(Box::new(platform), Box::new(gpu)),
        gpu: gpu_log,
        platform: platform_log,
    }
}

/// Install a draw callback that counts its invocations
fn count_draws(gx: &mut Gx, window: WindowHandle) -> Rc<Cell<usize>> {
    let draws = Rc::new(Cell::new(0));
    let counter = Rc::clone(&draws);
    assert!(gx.set_draw_callback(window, move |_ctx: &mut RenderContext<'_>| {
        counter.set(counter.get() + 1);
    }));
    draws
}
