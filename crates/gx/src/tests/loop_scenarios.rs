//! Event/render loop behavior

use std::cell::Cell;
use std::rc::Rc;

use super::{count_draws, harness};
use crate::application::ApplicationOptions;
use crate::config::WindowConfig;
use crate::context::Gx;
use crate::event_loop::TickOutcome;
use crate::gpu::{BufferData, BufferUsage, VertexAttribute};
use crate::input::{KeyAction, KeyCode, KeyEvent};
use crate::platform::PlatformEvent;
use crate::resource::{ObjectHandles, ResourceStatus, WindowHandle};
use crate::testing::GpuCommand;

fn close_on_escape(gx: &mut Gx, window: WindowHandle, event: KeyEvent) {
    if event.is_press(KeyCode::Escape) {
        gx.window_close(window);
    }
}

/// Adds a render object per invocation so deliveries can be counted
fn record_delivery(gx: &mut Gx, _window: WindowHandle, _event: KeyEvent) {
    gx.create_object(ObjectHandles::default(), None).unwrap();
}

fn quit_application(gx: &mut Gx, _window: WindowHandle, _event: KeyEvent) {
    gx.destroy_application();
}

fn keep_open(gx: &mut Gx, window: WindowHandle, _event: KeyEvent) {
    assert!(gx.window_cancel_close(window));
}

fn escape() -> KeyEvent {
    KeyEvent::new(KeyCode::Escape, KeyAction::Press)
}

#[test]
fn test_one_tick_draws_shown_window_once() {
    let mut h = harness();
    h.gx.create_application(ApplicationOptions::NONE);
    let window = h.gx.create_window(&WindowConfig::new("main", 640, 480)).unwrap();
    let draws = count_draws(&mut h.gx, window);
    h.platform.borrow_mut().framebuffer = (1280, 960);

    assert_eq!(h.gx.tick(), TickOutcome::Continue);

    assert_eq!(draws.get(), 1);
    let status = h.gx.resource(window).unwrap().status();
    assert!(status.is_showing());
    assert!(status.is_initiated());
    assert!(!status.should_close());
    assert_eq!(h.platform.borrow().swaps, 1);
    // Once at creation, once for the draw.
    assert_eq!(h.platform.borrow().make_current, 2);

    let view = h.gx.window(window).unwrap();
    assert_eq!((view.width(), view.height()), (1280, 960));
    assert!(view.has_draw_callback());
}

#[test]
fn test_hidden_window_ends_loop_without_drawing() {
    let mut h = harness();
    h.gx.create_application(ApplicationOptions::NONE);
    let window = h.gx
        .create_window(&WindowConfig::new("hidden", 64, 64).with_show(false))
        .unwrap();
    let draws = count_draws(&mut h.gx, window);

    h.gx.exec();

    assert_eq!(draws.get(), 0);
    assert_eq!(h.gx.tick(), TickOutcome::Exit);
    assert_eq!(h.platform.borrow().shown, 0);
    // The loop does not destroy hidden windows.
    assert!(h.gx.window(window).is_some());
}

#[test]
fn test_closing_one_window_keeps_the_other_drawing() {
    let mut h = harness();
    h.gx.create_application(ApplicationOptions::NONE);
    h.gx.add_keyboard_callback(close_on_escape);
    let first = h.gx.create_window(&WindowConfig::new("first", 64, 64)).unwrap();
    let second = h.gx.create_window(&WindowConfig::new("second", 64, 64)).unwrap();
    let first_draws = count_draws(&mut h.gx, first);
    let second_draws = count_draws(&mut h.gx, second);

    assert_eq!(h.gx.tick(), TickOutcome::Continue);
    assert_eq!((first_draws.get(), second_draws.get()), (1, 1));

    let surface = h.gx.window(first).unwrap().surface();
    h.platform
        .borrow_mut()
        .events
        .push_back(vec![PlatformEvent::Key { surface, event: escape() }]);

    assert_eq!(h.gx.tick(), TickOutcome::Continue);
    assert!(h.gx.window(first).is_none());
    assert_eq!(h.gx.application().unwrap().registry().window_count(), 1);
    assert_eq!((first_draws.get(), second_draws.get()), (1, 2));
    assert_eq!(h.platform.borrow().live(), 1);

    h.gx.window_close(second);
    assert!(h.gx.window_should_close(second));
    assert_eq!(h.gx.tick(), TickOutcome::Exit);
    assert_eq!(second_draws.get(), 2);
    assert!(h.gx.application().unwrap().registry().is_empty());
}

#[test]
fn test_duplicate_keyboard_callback_fires_once() {
    let mut h = harness();
    h.gx.create_application(ApplicationOptions::NONE);
    h.gx.add_keyboard_callback(record_delivery);
    h.gx.add_keyboard_callback(record_delivery);
    let window = h.gx.create_window(&WindowConfig::new("keys", 64, 64)).unwrap();

    let surface = h.gx.window(window).unwrap().surface();
    h.platform
        .borrow_mut()
        .events
        .push_back(vec![PlatformEvent::Key { surface, event: escape() }]);
    h.gx.tick();

    // One window plus one object from a single delivery.
    assert_eq!(h.gx.application().unwrap().registry().len(), 2);
    assert_eq!(h.gx.application().unwrap().keyboard_callback_count(), 1);
}

#[test]
fn test_every_distinct_callback_sees_the_event() {
    let mut h = harness();
    h.gx.create_application(ApplicationOptions::NONE);
    h.gx.add_keyboard_callback(record_delivery);
    h.gx.add_keyboard_callback(close_on_escape);
    let window = h.gx.create_window(&WindowConfig::new("keys", 64, 64)).unwrap();

    let surface = h.gx.window(window).unwrap().surface();
    h.platform
        .borrow_mut()
        .events
        .push_back(vec![PlatformEvent::Key { surface, event: escape() }]);

    assert_eq!(h.gx.tick(), TickOutcome::Exit);
    assert!(h.gx.window(window).is_none());
    assert_eq!(h.gx.application().unwrap().registry().render_objects().count(), 1);
}

#[test]
fn test_keep_alive_option_runs_with_hidden_windows() {
    let mut h = harness();
    h.gx.create_application(ApplicationOptions::KEEP_ALIVE_WHILE_HIDDEN);
    let window = h.gx
        .create_window(&WindowConfig::new("tray", 64, 64).with_show(false))
        .unwrap();
    let draws = count_draws(&mut h.gx, window);

    assert_eq!(h.gx.tick(), TickOutcome::Continue);
    assert_eq!(draws.get(), 0);

    h.gx.window_close(window);
    assert_eq!(h.gx.tick(), TickOutcome::Exit);
}

#[test]
fn test_show_flag_changes_are_reconciled() {
    let mut h = harness();
    h.gx.create_application(ApplicationOptions::KEEP_ALIVE_WHILE_HIDDEN);
    let window = h.gx.create_window(&WindowConfig::new("toggle", 64, 64)).unwrap();

    h.gx.tick();
    assert_eq!(h.platform.borrow().shown, 1);
    h.gx.tick();
    assert_eq!(h.platform.borrow().shown, 1);

    h.gx.window_mut(window).unwrap().set_show(false);
    h.gx.tick();
    assert_eq!(h.platform.borrow().hidden, 1);
    assert!(!h.gx.resource(window).unwrap().status().is_showing());

    h.gx.window_mut(window).unwrap().set_show(true);
    h.gx.tick();
    assert_eq!(h.platform.borrow().shown, 2);
    assert!(h.gx.resource(window).unwrap().status().contains(ResourceStatus::SHOWING));
}

#[test]
fn test_refresh_event_draws_regardless_of_show_flag() {
    let mut h = harness();
    h.gx.create_application(ApplicationOptions::NONE);
    let window = h.gx
        .create_window(&WindowConfig::new("damaged", 64, 64).with_show(false))
        .unwrap();
    let draws = count_draws(&mut h.gx, window);

    let surface = h.gx.window(window).unwrap().surface();
    h.platform
        .borrow_mut()
        .events
        .push_back(vec![PlatformEvent::Refresh { surface }]);

    assert_eq!(h.gx.tick(), TickOutcome::Exit);
    assert_eq!(draws.get(), 1);
    assert_eq!(h.platform.borrow().swaps, 1);
}

#[test]
fn test_close_request_event_destroys_window_in_same_tick() {
    let mut h = harness();
    h.gx.create_application(ApplicationOptions::NONE);
    let window = h.gx.create_window(&WindowConfig::new("closing", 64, 64)).unwrap();
    let draws = count_draws(&mut h.gx, window);

    let surface = h.gx.window(window).unwrap().surface();
    h.platform
        .borrow_mut()
        .events
        .push_back(vec![PlatformEvent::CloseRequested { surface }]);

    assert_eq!(h.gx.tick(), TickOutcome::Exit);
    assert_eq!(draws.get(), 0);
    assert!(h.gx.window(window).is_none());
    assert_eq!(h.platform.borrow().destroyed, 1);
}

#[test]
fn test_resize_event_updates_dimensions() {
    let mut h = harness();
    h.gx.create_application(ApplicationOptions::NONE);
    let window = h.gx.create_window(&WindowConfig::new("resize", 64, 64)).unwrap();

    let surface = h.gx.window(window).unwrap().surface();
    h.platform.borrow_mut().events.push_back(vec![PlatformEvent::FramebufferResized {
        surface,
        width: 500,
        height: 400,
    }]);
    h.gx.tick();

    let view = h.gx.window(window).unwrap();
    assert_eq!((view.width(), view.height()), (500, 400));
}

#[test]
fn test_tick_without_application_exits() {
    let mut h = harness();
    assert_eq!(h.gx.tick(), TickOutcome::Exit);
    h.gx.exec();
}

#[test]
fn test_callback_destroying_application_ends_loop() {
    let mut h = harness();
    h.gx.create_application(ApplicationOptions::NONE);
    h.gx.add_keyboard_callback(quit_application);
    let window = h.gx.create_window(&WindowConfig::new("quit", 64, 64)).unwrap();

    let surface = h.gx.window(window).unwrap().surface();
    h.platform.borrow_mut().events.push_back(vec![
        PlatformEvent::Key { surface, event: escape() },
        PlatformEvent::Refresh { surface },
    ]);

    assert_eq!(h.gx.tick(), TickOutcome::Exit);
    assert!(h.gx.application().is_none());
    assert_eq!(h.platform.borrow().live(), 0);
}

#[test]
fn test_draw_callback_drives_render_object() {
    let mut h = harness();
    h.gx.create_application(ApplicationOptions::NONE);
    let window = h.gx.create_window(&WindowConfig::new("triangle", 64, 64)).unwrap();
    let vertices = [0.0_f32; 9];
    let object = h.gx
        .create_render_object(5, BufferData::from_slice(BufferUsage::Static, &vertices))
        .unwrap();

    let attribute = VertexAttribute::float(0, 3, 12, 0);
    {
        let mut ctx = h.gx.render_context().unwrap();
        assert!(ctx.window().is_none());
        assert!(ctx.set_vertex_attribute(object, &attribute));
        assert!(ctx.enable_vertex_attribute(object, 0));
    }

    let seen = Rc::new(Cell::new(None));
    let seen_in_callback = Rc::clone(&seen);
    h.gx.set_draw_callback(window, move |ctx| {
        seen_in_callback.set(ctx.window_handle());
        assert!(ctx.update_viewport());
        ctx.set_background(0.0, 0.0, 1.0, 1.0);
        assert!(ctx.use_shader(object));
        assert!(ctx.bind_object(object));
        assert!(ctx.draw_vertices(object, 0, 3));
    });

    assert!(!h.gx.resource(object).unwrap().status().is_initiated());
    h.gx.tick();

    assert_eq!(seen.get(), Some(window));
    assert!(h.gx.resource(object).unwrap().status().is_initiated());
    let log = h.gpu.borrow();
    assert!(log.commands.contains(&GpuCommand::VertexAttribPointer(attribute)));
    assert!(log.commands.contains(&GpuCommand::UseProgram(5)));
    assert!(log.commands.contains(&GpuCommand::Viewport(0, 0, 320, 240)));
    assert!(log.commands.contains(&GpuCommand::DrawArrays(0, 3)));
    assert_eq!(log.draw_count(), 1);
}

#[test]
fn test_cancelled_close_keeps_window_alive() {
    let mut h = harness();
    h.gx.create_application(ApplicationOptions::NONE);
    h.gx.add_keyboard_callback(keep_open);
    let window = h.gx.create_window(&WindowConfig::new("sticky", 64, 64)).unwrap();
    let draws = count_draws(&mut h.gx, window);

    // Close requested by the user and by the application, then withdrawn by a key press.
    h.gx.window_close(window);
    let surface = h.gx.window(window).unwrap().surface();
    h.platform.borrow_mut().events.push_back(vec![
        PlatformEvent::CloseRequested { surface },
        PlatformEvent::Key { surface, event: escape() },
    ]);

    assert_eq!(h.gx.tick(), TickOutcome::Continue);
    assert!(h.gx.window(window).is_some());
    assert!(!h.gx.window_should_close(window));
    assert!(!h.gx.resource(window).unwrap().status().should_close());
    assert_eq!(draws.get(), 1);
}

#[test]
fn test_cancel_close_on_absent_window_is_rejected() {
    let mut h = harness();
    h.gx.create_application(ApplicationOptions::NONE);
    let window = h.gx.create_window(&WindowConfig::new("gone", 64, 64)).unwrap();
    assert!(h.gx.destroy_resource(window));
    assert!(!h.gx.window_cancel_close(window));

    let object = h.gx.create_object(ObjectHandles::default(), None).unwrap();
    let not_a_window: WindowHandle = object.cast();
    assert!(!h.gx.window_cancel_close(not_a_window));
}
