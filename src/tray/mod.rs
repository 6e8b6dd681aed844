//! Tray controller
//!
//! Owns the foreground event loop. Menu actions are not callbacks reaching
//! into server internals: the global menu-event handler forwards each event
//! through the event-loop proxy, and the loop itself reacts - opening the
//! browser, or stopping the server and exiting the process. The tray icon is
//! created inside the first loop iteration, which the gtk backend requires.

use std::net::Ipv4Addr;

use tao::event::{Event, StartCause};
use tao::event_loop::{ControlFlow, EventLoopBuilder};
use tray_icon::menu::{Menu, MenuEvent, MenuItemBuilder, PredefinedMenuItem};
use tray_icon::{TrayIcon, TrayIconBuilder};

use crate::errors::{Result, TrayServeError};
use crate::server::ServerHandle;

const MENU_ID_OPEN_BROWSER: &str = "open_browser";
const MENU_ID_STOP_SERVER: &str = "stop_server";

/// Tray icon color, a flat green square (RGBA)
const ICON_COLOR: [u8; 4] = [129, 201, 149, 255];
const ICON_SIZE: u32 = 32;

/// Events forwarded into the tray event loop
pub enum UserEvent {
    MenuEvent(MenuEvent),
}

/// The tray application: menu model plus the server handle it controls.
///
/// One per process, created after the server is running so the menu can show
/// the resolved LAN address.
pub struct TrayApp {
    server: ServerHandle,
    menu: Menu,
    icon: tray_icon::Icon,
}

impl TrayApp {
    pub fn new(server: ServerHandle, local_ip: Ipv4Addr) -> Result<Self> {
        let menu = build_menu(local_ip, server.port())?;
        let icon = tray_icon::Icon::from_rgba(solid_icon_rgba(), ICON_SIZE, ICON_SIZE)
            .map_err(|e| TrayServeError::Tray(format!("failed to create tray icon: {}", e)))?;

        Ok(Self { server, menu, icon })
    }

    /// Run the foreground event loop. Never returns: the process ends either
    /// through the Stop Server action (exit code 0) or external termination.
    pub fn run(self) -> ! {
        let event_loop = EventLoopBuilder::<UserEvent>::with_user_event().build();

        let proxy = event_loop.create_proxy();
        MenuEvent::set_event_handler(Some(move |event: MenuEvent| {
            let _ = proxy.send_event(UserEvent::MenuEvent(event));
        }));

        let TrayApp {
            mut server,
            menu,
            icon,
        } = self;
        let port = server.port();
        let mut tray_icon: Option<TrayIcon> = None;

        event_loop.run(move |event, _, control_flow| {
            *control_flow = ControlFlow::Wait;

            match event {
                Event::NewEvents(StartCause::Init) => {
                    // Must happen on the running loop (gtk). Failure leaves
                    // nothing to control the server with, so stop it and
                    // take the process down instead of serving headless.
                    match TrayIconBuilder::new()
                        .with_menu(Box::new(menu.clone()))
                        .with_tooltip(format!("{} on port {}", crate::APP_NAME, port))
                        .with_icon(icon.clone())
                        .build()
                    {
                        Ok(built) => {
                            tray_icon = Some(built);
                            log::debug!("Tray icon initialized");
                        }
                        Err(e) => {
                            log::error!("Failed to build tray icon: {}", e);
                            server.stop();
                            *control_flow = ControlFlow::ExitWithCode(1);
                        }
                    }
                }
                Event::UserEvent(UserEvent::MenuEvent(menu_event)) => {
                    match menu_event.id.as_ref() {
                        MENU_ID_OPEN_BROWSER => open_browser(port),
                        MENU_ID_STOP_SERVER => {
                            // Stop the listener first so the port is released
                            // even if tearing the loop down misbehaves, then
                            // let tao end the process with exit code 0.
                            server.stop();
                            tray_icon.take();
                            *control_flow = ControlFlow::Exit;
                        }
                        _ => {}
                    }
                }
                _ => {}
            }
        })
    }
}

/// Launch the default browser at the served root. Fire-and-forget.
pub fn open_browser(port: u16) {
    let url = format!("http://localhost:{}", port);
    if let Err(e) = webbrowser::open(&url) {
        log::warn!("Failed to open browser at {}: {}", url, e);
    }
}

/// Build the fixed tray menu: LAN address label, separator, actions
fn build_menu(local_ip: Ipv4Addr, port: u16) -> Result<Menu> {
    let menu = Menu::new();

    let mobile_info = MenuItemBuilder::new()
        .text(format!("📱 Mobile: {}:{}", local_ip, port))
        .id("mobile_info".into())
        .enabled(false)
        .build();
    let open_browser = MenuItemBuilder::new()
        .text("🌐 Open Browser")
        .id(MENU_ID_OPEN_BROWSER.into())
        .enabled(true)
        .build();
    let stop_server = MenuItemBuilder::new()
        .text("🛑 Stop Server")
        .id(MENU_ID_STOP_SERVER.into())
        .enabled(true)
        .build();

    menu.append(&mobile_info)
        .and_then(|_| menu.append(&PredefinedMenuItem::separator()))
        .and_then(|_| menu.append(&open_browser))
        .and_then(|_| menu.append(&stop_server))
        .map_err(|e| TrayServeError::Tray(format!("failed to build tray menu: {}", e)))?;

    Ok(menu)
}

/// RGBA buffer for the generated solid-color icon
fn solid_icon_rgba() -> Vec<u8> {
    ICON_COLOR.repeat((ICON_SIZE * ICON_SIZE) as usize)
}
