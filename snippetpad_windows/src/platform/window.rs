//! Window creation and message handling.

use crate::app::App;
use crate::platform::handlers::{
    after_dpichanged, on_activate_instance, on_close, on_command, on_ctlcolorstatic, on_displaychange, on_dpichanged,
    on_getminmaxinfo, on_hotkey,
};
use crate::platform::wm;
use crate::storage::{self, DataPaths};
use crate::ui::panel::PanelWidgets;
use crate::ui::top_bar::TopBar;
use snippetpad_core::layout::DpiScale;
use windows::{
    Win32::{
        Foundation::{HINSTANCE, HWND, LPARAM, LRESULT, WPARAM},
        Graphics::Gdi::{COLOR_BTNFACE, GetSysColorBrush},
        System::LibraryLoader::GetModuleHandleW,
        UI::{
            HiDpi::{GetDpiForSystem, GetDpiForWindow},
            WindowsAndMessaging::{
                CreateWindowExW, DefWindowProcW, DestroyWindow, DispatchMessageW, GWLP_USERDATA,
                GetMessageW, GetParent, GetWindowLongPtrW, IDC_ARROW, IsDialogMessageW,
                LoadCursorW, MSG, PostMessageW, PostQuitMessage, RegisterClassW, SW_SHOW,
                SendMessageW, SetWindowLongPtrW, ShowWindow, TranslateMessage, WM_CLOSE,
                WM_COMMAND, WM_CREATE, WM_CTLCOLORSTATIC, WM_DESTROY, WM_DISPLAYCHANGE,
                WM_DPICHANGED, WM_GETMINMAXINFO, WM_HOTKEY, WM_MOUSEWHEEL, WM_SIZE, WM_TIMER,
                WM_VSCROLL, WNDCLASSW, WS_CAPTION, WS_CHILD, WS_CLIPCHILDREN,
                WS_EX_CONTROLPARENT, WS_EX_TOPMOST, WS_MINIMIZEBOX, WS_SIZEBOX, WS_SYSMENU,
                WS_VISIBLE, WS_VSCROLL,
            },
        },
    },
    core::{PCWSTR, Result, w},
};

pub const MAIN_CLASS: PCWSTR = w!("SnippetPadWindowClass");
const SCROLL_CLASS: PCWSTR = w!("SnippetPadScrollPanel");

fn register_classes() -> Result<HINSTANCE> {
    unsafe {
        let instance = GetModuleHandleW(None)?;
        let cursor = LoadCursorW(None, IDC_ARROW)?;
        let background = GetSysColorBrush(COLOR_BTNFACE);

        let main = WNDCLASSW {
            lpfnWndProc: Some(wndproc),
            hInstance: instance.into(),
            hCursor: cursor,
            hbrBackground: background,
            lpszClassName: MAIN_CLASS,
            ..Default::default()
        };
        let atom = RegisterClassW(&main);
        debug_assert!(atom != 0);

        let scroll = WNDCLASSW {
            lpfnWndProc: Some(scroll_wndproc),
            hInstance: instance.into(),
            hCursor: cursor,
            hbrBackground: background,
            lpszClassName: SCROLL_CLASS,
            ..Default::default()
        };
        let atom = RegisterClassW(&scroll);
        debug_assert!(atom != 0);

        Ok(instance.into())
    }
}

/// Runs the application on `paths`.
pub fn run(paths: DataPaths) -> Result<()> {
    let settings = storage::load_settings(&paths);
    tracing::info!(dir = %paths.dir.display(), "data directory");

    unsafe {
        let instance = register_classes()?;

        let system_scale = DpiScale::from_dpi(GetDpiForSystem());
        let mut ex_style = WS_EX_CONTROLPARENT;
        if settings.general.always_on_top {
            ex_style |= WS_EX_TOPMOST;
        }
        let style = WS_CAPTION | WS_SYSMENU | WS_MINIMIZEBOX | WS_SIZEBOX | WS_CLIPCHILDREN;

        let hwnd = CreateWindowExW(
            ex_style,
            MAIN_CLASS,
            w!("SnippetPad"),
            style,
            settings.window.x,
            settings.window.y,
            system_scale.scale(settings.window.width),
            system_scale.scale(settings.window.height),
            None,
            None,
            Some(instance),
            None,
        )?;

        let scale = DpiScale::from_dpi(GetDpiForWindow(hwnd));
        let top_bar = match TopBar::create(hwnd, scale, settings.general.always_on_top) {
            Ok(top_bar) => top_bar,
            Err(err) => {
                let _ = DestroyWindow(hwnd);
                return Err(err);
            }
        };
        let scroll = match CreateWindowExW(
            WS_EX_CONTROLPARENT,
            SCROLL_CLASS,
            None,
            WS_CHILD | WS_VISIBLE | WS_VSCROLL | WS_CLIPCHILDREN,
            0,
            0,
            0,
            0,
            Some(hwnd),
            None,
            Some(instance),
            None,
        ) {
            Ok(scroll) => scroll,
            Err(err) => {
                let _ = DestroyWindow(hwnd);
                return Err(err);
            }
        };
        let widgets = PanelWidgets::new(scroll, scale);

        let app = Box::new(App::new(hwnd, top_bar, widgets, paths, settings));
        let app_ptr = Box::into_raw(app);
        SetWindowLongPtrW(hwnd, GWLP_USERDATA, app_ptr as isize);

        if let Some(app) = get_app(hwnd) {
            app.start();
        }

        let _ = ShowWindow(hwnd, SW_SHOW);

        let mut msg = MSG::default();
        while GetMessageW(&mut msg, None, 0, 0).into() {
            // Tab navigation between the buttons.
            if IsDialogMessageW(hwnd, &msg).as_bool() {
                continue;
            }
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }

        Ok(())
    }
}

/// Gets the App instance from the window's user data.
///
/// # Safety
///
/// Caller must ensure only one mutable reference exists at a time.
/// Calling this twice without dropping the first reference is UB.
unsafe fn get_app(hwnd: HWND) -> Option<&'static mut App> {
    unsafe {
        let ptr = GetWindowLongPtrW(hwnd, GWLP_USERDATA) as *mut App;
        if ptr.is_null() { None } else { Some(&mut *ptr) }
    }
}

extern "system" fn wndproc(hwnd: HWND, msg: u32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    unsafe {
        match msg {
            WM_CREATE => {
                // App is set up after CreateWindowExW returns
                LRESULT(0)
            }
            WM_GETMINMAXINFO => on_getminmaxinfo(hwnd, lparam),
            WM_SIZE => {
                if let Some(app) = get_app(hwnd) {
                    app.layout_chrome();
                }
                LRESULT(0)
            }
            WM_COMMAND => match get_app(hwnd) {
                Some(app) => on_command(app, wparam),
                None => LRESULT(0),
            },
            WM_CTLCOLORSTATIC => get_app(hwnd)
                .and_then(|app| on_ctlcolorstatic(app, wparam, lparam))
                .unwrap_or_else(|| DefWindowProcW(hwnd, msg, wparam, lparam)),
            WM_TIMER => {
                if let Some(app) = get_app(hwnd) {
                    app.on_status_timer();
                }
                LRESULT(0)
            }
            WM_HOTKEY => match get_app(hwnd) {
                Some(app) => on_hotkey(app, wparam),
                None => LRESULT(0),
            },
            WM_DPICHANGED => {
                on_dpichanged(hwnd, wparam, lparam);
                if let Some(app) = get_app(hwnd) {
                    after_dpichanged(app);
                }
                LRESULT(0)
            }
            WM_DISPLAYCHANGE => {
                if let Some(app) = get_app(hwnd) {
                    on_displaychange(app);
                }
                DefWindowProcW(hwnd, msg, wparam, lparam)
            }
            WM_MOUSEWHEEL | wm::PANEL_WHEEL => {
                if let Some(app) = get_app(hwnd) {
                    app.wheel(((wparam.0 >> 16) & 0xFFFF) as u16 as i16);
                }
                LRESULT(0)
            }
            wm::PANEL_VSCROLL => {
                if let Some(app) = get_app(hwnd) {
                    app.scroll((wparam.0 & 0xFFFF) as u32);
                }
                LRESULT(0)
            }
            wm::PANEL_RESIZED => {
                if let Some(app) = get_app(hwnd) {
                    app.panel_resized();
                }
                LRESULT(0)
            }
            wm::PROCESS_UI_COMMANDS => {
                if let Some(app) = get_app(hwnd) {
                    app.process_pending();
                }
                LRESULT(0)
            }
            wm::ACTIVATE_INSTANCE => match get_app(hwnd) {
                Some(app) => on_activate_instance(app, lparam),
                None => LRESULT(0),
            },
            WM_CLOSE => {
                if let Some(app) = get_app(hwnd) {
                    on_close(app);
                }
                let _ = DestroyWindow(hwnd);
                LRESULT(0)
            }
            WM_DESTROY => {
                let ptr = GetWindowLongPtrW(hwnd, GWLP_USERDATA) as *mut App;
                if !ptr.is_null() {
                    SetWindowLongPtrW(hwnd, GWLP_USERDATA, 0);
                    drop(Box::from_raw(ptr));
                }
                PostQuitMessage(0);
                LRESULT(0)
            }
            _ => DefWindowProcW(hwnd, msg, wparam, lparam),
        }
    }
}

/// The scroll panel hosts the group widgets but owns no state. Everything
/// that needs the App is forwarded to the main window.
extern "system" fn scroll_wndproc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    unsafe {
        let Ok(parent) = GetParent(hwnd) else {
            return DefWindowProcW(hwnd, msg, wparam, lparam);
        };
        match msg {
            WM_COMMAND => SendMessageW(parent, msg, Some(wparam), Some(lparam)),
            WM_VSCROLL => SendMessageW(parent, wm::PANEL_VSCROLL, Some(wparam), None),
            WM_MOUSEWHEEL => SendMessageW(parent, wm::PANEL_WHEEL, Some(wparam), Some(lparam)),
            WM_SIZE => {
                // Posted: the main window may be mid-update when this arrives.
                let _ = PostMessageW(Some(parent), wm::PANEL_RESIZED, WPARAM(0), LPARAM(0));
                LRESULT(0)
            }
            _ => DefWindowProcW(hwnd, msg, wparam, lparam),
        }
    }
}
