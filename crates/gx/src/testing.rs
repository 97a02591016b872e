//! Recording backends for unit tests
//!
//! Both doubles share their log through `Rc<RefCell<_>>` so tests can inspect
//! calls after handing the backend to a `Gx`.

use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};
use std::ffi::c_void;
use std::rc::Rc;

use slotmap::SlotMap;

use crate::gpu::{
    AttributeType, BufferData, BufferType, ClearMask, GpuDevice, LinkOutput, MapAccess,
    ShaderCompilation, ShaderStage, VertexAttribute,
};
use crate::platform::{
    Platform, PlatformError, PlatformEvent, PlatformResult, SurfaceDescriptor, SurfaceId,
};

/// One recorded GPU call
#[derive(Debug, Clone, PartialEq)]
pub enum GpuCommand {
    LoadFunctions,
    GenVertexArray(u32),
    BindVertexArray(u32),
    DeleteVertexArray(u32),
    GenBuffer(BufferType, u32, usize),
    BindBuffer(BufferType, u32),
    DeleteBuffer(u32),
    BufferSubData(BufferType, usize, usize),
    BindBufferBase(BufferType, u32, u32),
    UseProgram(u32),
    VertexAttribPointer(VertexAttribute),
    EnableAttrib(u32, u32),
    DisableAttrib(u32, u32),
    DrawArrays(usize, usize),
    DrawElements(usize, AttributeType),
    Viewport(i32, i32, i32, i32),
    ClearColor(f32, f32, f32, f32),
    Clear(ClearMask),
}

#[derive(Debug, Default)]
pub struct GpuLog {
    pub commands: Vec<GpuCommand>,
    pub mapped_writes: Vec<(BufferType, usize, usize)>,
    pub live_vertex_arrays: HashSet<u32>,
    pub live_buffers: HashSet<u32>,
    pub deleted_shaders: Vec<u32>,
    pub linked_programs: usize,
    pub fail_load: bool,
    pub fail_map: bool,
    pub fail_unmap: bool,
    pub fail_link: bool,
    pub failing_stage: Option<ShaderStage>,
    next_name: u32,
}

impl GpuLog {
    fn name(&mut self) -> u32 {
        self.next_name += 1;
        self.next_name
    }

    /// Last buffer bound to `ty`
    pub fn last_bound(&self, ty: BufferType) -> Option<u32> {
        self.commands.iter().rev().find_map(|command| match command {
            GpuCommand::BindBuffer(bound, buffer) if *bound == ty => Some(*buffer),
            _ => None,
        })
    }

    pub fn draw_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| matches!(command, GpuCommand::DrawArrays(..) | GpuCommand::DrawElements(..)))
            .count()
    }

    pub fn live_names(&self) -> usize {
        self.live_vertex_arrays.len() + self.live_buffers.len()
    }
}

pub struct RecordingGpu {
    log: Rc<RefCell<GpuLog>>,
}

impl RecordingGpu {
    pub fn new() -> (Self, Rc<RefCell<GpuLog>>) {
        let log = Rc::new(RefCell::new(GpuLog::default()));
        (Self { log: Rc::clone(&log) }, log)
    }

    fn record(&self, command: GpuCommand) {
        self.log.borrow_mut().commands.push(command);
    }
}

impl GpuDevice for RecordingGpu {
    fn load_functions(&mut self, loader: &mut dyn FnMut(&'static str) -> *const c_void) -> bool {
        let _ = loader("glGenVertexArrays");
        self.record(GpuCommand::LoadFunctions);
        !self.log.borrow().fail_load
    }

    fn gen_vertex_array(&mut self) -> u32 {
        let mut log = self.log.borrow_mut();
        let name = log.name();
        log.live_vertex_arrays.insert(name);
        log.commands.push(GpuCommand::GenVertexArray(name));
        name
    }

    fn bind_vertex_array(&mut self, vao: u32) {
        self.record(GpuCommand::BindVertexArray(vao));
    }

    fn delete_vertex_array(&mut self, vao: u32) {
        let mut log = self.log.borrow_mut();
        log.live_vertex_arrays.remove(&vao);
        log.commands.push(GpuCommand::DeleteVertexArray(vao));
    }

    fn gen_buffer(&mut self, ty: BufferType, data: BufferData<'_>) -> u32 {
        let mut log = self.log.borrow_mut();
        let name = log.name();
        log.live_buffers.insert(name);
        log.commands.push(GpuCommand::GenBuffer(ty, name, data.bytes.len()));
        name
    }

    fn bind_buffer(&mut self, ty: BufferType, buffer: u32) {
        self.record(GpuCommand::BindBuffer(ty, buffer));
    }

    fn delete_buffer(&mut self, buffer: u32) {
        let mut log = self.log.borrow_mut();
        log.live_buffers.remove(&buffer);
        log.commands.push(GpuCommand::DeleteBuffer(buffer));
    }

    fn write_mapped_range(&mut self, ty: BufferType, offset: usize, data: &[u8], _access: MapAccess) -> bool {
        let mut log = self.log.borrow_mut();
        if log.fail_map {
            return false;
        }
        log.mapped_writes.push((ty, offset, data.len()));
        true
    }

    fn unmap_buffer(&mut self, _ty: BufferType) -> bool {
        !self.log.borrow().fail_unmap
    }

    fn buffer_sub_data(&mut self, ty: BufferType, offset: usize, data: &[u8]) {
        self.record(GpuCommand::BufferSubData(ty, offset, data.len()));
    }

    fn bind_buffer_base(&mut self, ty: BufferType, binding_point: u32, buffer: u32) {
        self.record(GpuCommand::BindBufferBase(ty, binding_point, buffer));
    }

    fn compile_shader(&mut self, _source: &str, stage: ShaderStage) -> ShaderCompilation {
        let mut log = self.log.borrow_mut();
        let handle = log.name();
        let success = log.failing_stage != Some(stage);
        ShaderCompilation {
            handle,
            success,
            info_log: if success { String::new() } else { format!("0:1: {:?} syntax error", stage) },
        }
    }

    fn link_program(&mut self, _shaders: &[u32]) -> LinkOutput {
        let mut log = self.log.borrow_mut();
        log.linked_programs += 1;
        let program = log.name();
        let success = !log.fail_link;
        LinkOutput {
            program,
            success,
            log: if success { String::new() } else { "undefined symbol".to_string() },
        }
    }

    fn delete_shader(&mut self, shader: u32) {
        self.log.borrow_mut().deleted_shaders.push(shader);
    }

    fn use_program(&mut self, program: u32) {
        self.record(GpuCommand::UseProgram(program));
    }

    fn vertex_attrib_pointer(&mut self, attribute: &VertexAttribute) {
        self.record(GpuCommand::VertexAttribPointer(*attribute));
    }

    fn enable_vertex_array_attrib(&mut self, vao: u32, index: u32) {
        self.record(GpuCommand::EnableAttrib(vao, index));
    }

    fn disable_vertex_array_attrib(&mut self, vao: u32, index: u32) {
        self.record(GpuCommand::DisableAttrib(vao, index));
    }

    fn draw_arrays(&mut self, first: usize, count: usize) {
        self.record(GpuCommand::DrawArrays(first, count));
    }

    fn draw_elements(&mut self, count: usize, index_type: AttributeType) {
        self.record(GpuCommand::DrawElements(count, index_type));
    }

    fn viewport(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.record(GpuCommand::Viewport(x, y, width, height));
    }

    fn clear_color(&mut self, r: f32, g: f32, b: f32, a: f32) {
        self.record(GpuCommand::ClearColor(r, g, b, a));
    }

    fn clear(&mut self, mask: ClearMask) {
        self.record(GpuCommand::Clear(mask));
    }
}

#[derive(Debug)]
pub struct SurfaceState {
    pub title: String,
    pub visible: bool,
    pub should_close: bool,
}

#[derive(Debug)]
pub struct PlatformLog {
    pub surfaces: SlotMap<SurfaceId, SurfaceState>,
    pub created: usize,
    pub destroyed: usize,
    pub shown: usize,
    pub hidden: usize,
    pub swaps: usize,
    pub make_current: usize,
    pub swap_interval: Option<u32>,
    pub framebuffer: (i32, i32),
    pub fail_create: bool,
    /// Batches returned by successive `poll_events` calls
    pub events: VecDeque<Vec<PlatformEvent>>,
    pub calls: usize,
}

impl Default for PlatformLog {
    fn default() -> Self {
        Self {
            surfaces: SlotMap::with_key(),
            created: 0,
            destroyed: 0,
            shown: 0,
            hidden: 0,
            swaps: 0,
            make_current: 0,
            swap_interval: None,
            framebuffer: (320, 240),
            fail_create: false,
            events: VecDeque::new(),
            calls: 0,
        }
    }
}

impl PlatformLog {
    pub fn live(&self) -> usize {
        self.surfaces.len()
    }
}

pub struct RecordingPlatform {
    log: Rc<RefCell<PlatformLog>>,
}

impl RecordingPlatform {
    pub fn new() -> (Self, Rc<RefCell<PlatformLog>>) {
        let log = Rc::new(RefCell::new(PlatformLog::default()));
        (Self { log: Rc::clone(&log) }, log)
    }
}

impl Platform for RecordingPlatform {
    fn create_window(&mut self, descriptor: &SurfaceDescriptor<'_>) -> PlatformResult<SurfaceId> {
        let mut log = self.log.borrow_mut();
        log.calls += 1;
        if log.fail_create {
            return Err(PlatformError::CreationFailed("no display".to_string()));
        }
        log.created += 1;
        Ok(log.surfaces.insert(SurfaceState {
            title: descriptor.title.to_string(),
            visible: descriptor.visible,
            should_close: false,
        }))
    }

    fn destroy_window(&mut self, surface: SurfaceId) {
        let mut log = self.log.borrow_mut();
        log.calls += 1;
        if log.surfaces.remove(surface).is_some() {
            log.destroyed += 1;
        }
    }

    fn show_window(&mut self, surface: SurfaceId) {
        let mut log = self.log.borrow_mut();
        log.calls += 1;
        log.shown += 1;
        if let Some(state) = log.surfaces.get_mut(surface) {
            state.visible = true;
        }
    }

    fn hide_window(&mut self, surface: SurfaceId) {
        let mut log = self.log.borrow_mut();
        log.calls += 1;
        log.hidden += 1;
        if let Some(state) = log.surfaces.get_mut(surface) {
            state.visible = false;
        }
    }

    fn poll_events(&mut self) -> Vec<PlatformEvent> {
        self.log.borrow_mut().events.pop_front().unwrap_or_default()
    }

    fn should_close(&self, surface: SurfaceId) -> bool {
        self.log
            .borrow()
            .surfaces
            .get(surface)
            .is_some_and(|state| state.should_close)
    }

    fn set_should_close(&mut self, surface: SurfaceId, should_close: bool) {
        if let Some(state) = self.log.borrow_mut().surfaces.get_mut(surface) {
            state.should_close = should_close;
        }
    }

    fn make_current(&mut self, _surface: SurfaceId) {
        self.log.borrow_mut().make_current += 1;
    }

    fn framebuffer_size(&self, _surface: SurfaceId) -> (i32, i32) {
        self.log.borrow().framebuffer
    }

    fn swap_buffers(&mut self, _surface: SurfaceId) {
        self.log.borrow_mut().swaps += 1;
    }

    fn set_swap_interval(&mut self, interval: u32) {
        self.log.borrow_mut().swap_interval = Some(interval);
    }

    fn proc_address(&mut self, _surface: SurfaceId, _name: &str) -> *const c_void {
        std::ptr::null()
    }
}
