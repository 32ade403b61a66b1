//! Overlay window: application context, toast window, run loop

use std::ffi::c_void;
use std::mem;
use std::ptr;

use tracing::{debug, info, warn};
use windows::Win32::Foundation::{COLORREF, HINSTANCE, HWND, LPARAM, LRESULT, POINT, RECT, WPARAM};
use windows::Win32::Graphics::Gdi::{
    AC_SRC_ALPHA, AC_SRC_OVER, AlphaBlend, BI_RGB, BITMAPINFO, BITMAPINFOHEADER, BLENDFUNCTION,
    BeginPaint, CLEARTYPE_QUALITY, CreateCompatibleDC, CreateDIBSection, CreateFontIndirectW,
    CreateRoundRectRgn, CreateSolidBrush, DEFAULT_CHARSET, DIB_RGB_COLORS, DT_CALCRECT,
    DT_NOPREFIX, DT_SINGLELINE, DeleteDC, DeleteObject, DrawTextW, EndPaint, FillRect,
    GetMonitorInfoW, HBITMAP, HDC, HFONT, HGDIOBJ, LOGFONTW, MONITOR_DEFAULTTOPRIMARY,
    MONITORINFO, MonitorFromPoint, PAINTSTRUCT, SelectObject, SetBkMode, SetTextColor,
    SetWindowRgn, TRANSPARENT, UpdateWindow,
};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, DestroyWindow, DispatchMessageW, GWLP_USERDATA, GetMessageW,
    GetWindowLongPtrW, KillTimer, LWA_ALPHA, MSG, RegisterClassW, SW_SHOWNOACTIVATE,
    SetLayeredWindowAttributes, SetTimer, SetWindowLongPtrW, ShowWindow, TranslateMessage,
    UnregisterClassW, WINDOW_EX_STYLE, WM_ERASEBKGND, WM_PAINT, WM_TIMER, WNDCLASSW,
    WS_EX_LAYERED, WS_EX_NOACTIVATE, WS_EX_TOOLWINDOW, WS_EX_TOPMOST, WS_EX_TRANSPARENT, WS_POPUP,
};
use windows::core::PCWSTR;

use crate::animation::run_fade;
use crate::config::ToastConfig;
use crate::error::WindowError;
use crate::icon::IconPixels;
use crate::layout::{self, Frame, Size, ToastLayout};
use crate::status::Status;
use crate::timeline::{Step, Timeline};

const CLASS_NAME: &str = "ToastOverlayWindow";

/// Timer id for the hold stage
const HOLD_TIMER_ID: usize = 1;

fn widestring(value: &str) -> Vec<u16> {
    value.encode_utf16().chain(std::iter::once(0)).collect()
}

/// Layered, topmost, click-through, never activated
pub fn overlay_ex_style() -> WINDOW_EX_STYLE {
    WS_EX_LAYERED | WS_EX_TOPMOST | WS_EX_TOOLWINDOW | WS_EX_NOACTIVATE | WS_EX_TRANSPARENT
}

/// Application context: module instance + registered window class
/// Created once, passed to window construction, unregistered on drop
pub struct App {
    hinstance: HINSTANCE,
    class_name: Vec<u16>,
}

impl App {
    pub fn init() -> Result<Self, WindowError> {
        let hinstance: HINSTANCE = unsafe { GetModuleHandleW(PCWSTR::null()) }
            .map_err(|_| WindowError::RegisterClass)?
            .into();
        let class_name = widestring(CLASS_NAME);

        let wc = WNDCLASSW {
            hInstance: hinstance,
            lpszClassName: PCWSTR(class_name.as_ptr()),
            lpfnWndProc: Some(toast_wndproc),
            ..Default::default()
        };
        if unsafe { RegisterClassW(&wc) } == 0 {
            return Err(WindowError::RegisterClass);
        }
        debug!("Window class registered");

        Ok(Self {
            hinstance,
            class_name,
        })
    }

    fn class(&self) -> PCWSTR {
        PCWSTR(self.class_name.as_ptr())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        unsafe {
            let _ = UnregisterClassW(self.class(), Some(self.hinstance));
        }
    }
}

/// Icon as a selected DIB in a memory DC, ready for AlphaBlend
struct IconBitmap {
    dc: HDC,
    bitmap: HBITMAP,
    old: HGDIOBJ,
    size: Size,
}

impl IconBitmap {
    fn create(pixels: &IconPixels) -> Result<Self, WindowError> {
        let dc = unsafe { CreateCompatibleDC(None) };
        if dc.is_invalid() {
            return Err(WindowError::Bitmap("CreateCompatibleDC".to_string()));
        }

        let bmi = BITMAPINFO {
            bmiHeader: BITMAPINFOHEADER {
                biSize: mem::size_of::<BITMAPINFOHEADER>() as u32,
                biWidth: pixels.size.width,
                biHeight: -pixels.size.height, // top-down
                biPlanes: 1,
                biBitCount: 32,
                biCompression: BI_RGB.0,
                ..Default::default()
            },
            ..Default::default()
        };

        let mut bits: *mut c_void = ptr::null_mut();
        let bitmap = match unsafe { CreateDIBSection(Some(dc), &bmi, DIB_RGB_COLORS, &mut bits, None, 0) } {
            Ok(bitmap) if !bits.is_null() => bitmap,
            Ok(bitmap) => {
                unsafe {
                    let _ = DeleteObject(bitmap.into());
                    let _ = DeleteDC(dc);
                }
                return Err(WindowError::Bitmap("CreateDIBSection → null bits".to_string()));
            }
            Err(e) => {
                unsafe {
                    let _ = DeleteDC(dc);
                }
                return Err(WindowError::Bitmap(e.to_string()));
            }
        };

        unsafe {
            ptr::copy_nonoverlapping(pixels.bgra.as_ptr(), bits as *mut u8, pixels.bgra.len());
        }
        let old = unsafe { SelectObject(dc, bitmap.into()) };

        Ok(Self {
            dc,
            bitmap,
            old,
            size: pixels.size,
        })
    }

    fn draw(&self, hdc: HDC, frame: &Frame) {
        let blend = BLENDFUNCTION {
            BlendOp: AC_SRC_OVER as u8,
            BlendFlags: 0,
            SourceConstantAlpha: 255,
            AlphaFormat: AC_SRC_ALPHA as u8,
        };
        unsafe {
            let _ = AlphaBlend(
                hdc,
                frame.x,
                frame.y,
                frame.width,
                frame.height,
                self.dc,
                0,
                0,
                self.size.width,
                self.size.height,
                blend,
            );
        }
    }
}

impl Drop for IconBitmap {
    fn drop(&mut self) {
        unsafe {
            SelectObject(self.dc, self.old);
            let _ = DeleteObject(self.bitmap.into());
            let _ = DeleteDC(self.dc);
        }
    }
}

/// Everything WM_PAINT needs; owned by ToastWindow, pointer in GWLP_USERDATA
struct PaintState {
    canvas: Size,
    layout: ToastLayout,
    text: Vec<u16>,
    font: HFONT,
    panel_color: COLORREF,
    text_color: COLORREF,
    icon: Option<IconBitmap>,
}

impl PaintState {
    fn paint(&self, hdc: HDC) {
        let panel = RECT {
            left: 0,
            top: 0,
            right: self.canvas.width,
            bottom: self.canvas.height,
        };
        unsafe {
            let brush = CreateSolidBrush(self.panel_color);
            FillRect(hdc, &panel, brush);
            let _ = DeleteObject(brush.into());
        }

        if let (Some(icon), Some(frame)) = (&self.icon, &self.layout.icon) {
            icon.draw(hdc, frame);
        }

        let label = &self.layout.label;
        let mut rect = RECT {
            left: label.x,
            top: label.y,
            right: label.right(),
            bottom: label.bottom(),
        };
        let mut text = self.text.clone();
        unsafe {
            let old_font = SelectObject(hdc, self.font.into());
            SetBkMode(hdc, TRANSPARENT);
            SetTextColor(hdc, self.text_color);
            DrawTextW(hdc, &mut text, &mut rect, DT_SINGLELINE | DT_NOPREFIX);
            SelectObject(hdc, old_font);
        }
    }
}

impl Drop for PaintState {
    fn drop(&mut self) {
        unsafe {
            let _ = DeleteObject(self.font.into());
        }
    }
}

unsafe extern "system" fn toast_wndproc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match msg {
        WM_ERASEBKGND => LRESULT(1),
        WM_PAINT => {
            let mut ps = PAINTSTRUCT::default();
            let hdc = unsafe { BeginPaint(hwnd, &mut ps) };
            let state = unsafe { GetWindowLongPtrW(hwnd, GWLP_USERDATA) } as *const PaintState;
            if !hdc.is_invalid() && !state.is_null() {
                unsafe { (*state).paint(hdc) };
            }
            unsafe {
                let _ = EndPaint(hwnd, &ps);
            }
            LRESULT(0)
        }
        _ => unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) },
    }
}

/// Create the label font from config
fn create_font(config: &ToastConfig) -> Result<HFONT, WindowError> {
    let mut logfont = LOGFONTW {
        lfHeight: -config.font_size,
        lfWeight: config.font_weight,
        lfCharSet: DEFAULT_CHARSET,
        lfQuality: CLEARTYPE_QUALITY,
        ..Default::default()
    };
    for (dst, src) in logfont
        .lfFaceName
        .iter_mut()
        .take(31)
        .zip(config.font_face.encode_utf16())
    {
        *dst = src;
    }

    let font = unsafe { CreateFontIndirectW(&logfont) };
    if font.is_invalid() {
        return Err(WindowError::Font);
    }
    Ok(font)
}

/// Measure single-line text extent with a font
fn measure_text(font: HFONT, text: &[u16]) -> Size {
    let mut rect = RECT::default();
    let mut buf = text.to_vec();
    unsafe {
        let dc = CreateCompatibleDC(None);
        let old = SelectObject(dc, font.into());
        DrawTextW(dc, &mut buf, &mut rect, DT_CALCRECT | DT_SINGLELINE | DT_NOPREFIX);
        SelectObject(dc, old);
        let _ = DeleteDC(dc);
    }
    Size::new(rect.right - rect.left, rect.bottom - rect.top)
}

/// Primary monitor work area
fn primary_work_area() -> Option<Frame> {
    let monitor = unsafe { MonitorFromPoint(POINT::default(), MONITOR_DEFAULTTOPRIMARY) };
    let mut info = MONITORINFO {
        cbSize: mem::size_of::<MONITORINFO>() as u32,
        ..Default::default()
    };
    if unsafe { GetMonitorInfoW(monitor, &mut info) }.as_bool() {
        let wa = info.rcWork;
        Some(Frame {
            x: wa.left,
            y: wa.top,
            width: wa.right - wa.left,
            height: wa.bottom - wa.top,
        })
    } else {
        None
    }
}

/// The toast window; destroyed on drop
pub struct ToastWindow {
    hwnd: HWND,
    // Boxed for a stable address referenced by the window proc
    _state: Box<PaintState>,
}

impl ToastWindow {
    pub fn create(
        app: &App,
        status: Status,
        icon: Option<&IconPixels>,
        config: &ToastConfig,
    ) -> Result<Self, WindowError> {
        let font = create_font(config)?;
        let text: Vec<u16> = status.message().encode_utf16().collect();
        let label = measure_text(font, &text);

        let icon = match icon.map(IconBitmap::create).transpose() {
            Ok(icon) => icon,
            Err(e) => {
                // Text only
                warn!("{e}");
                None
            }
        };
        let layout = layout::compose(
            config.canvas,
            icon.as_ref().map(|_| config.icon_size),
            label,
            config.spacing,
        );
        debug!(?layout, "Toast layout");

        let state = Box::new(PaintState {
            canvas: config.canvas,
            layout,
            text,
            font,
            panel_color: COLORREF(config.panel_color.bgr()),
            text_color: COLORREF(config.text_color.bgr()),
            icon,
        });

        let work_area = primary_work_area().unwrap_or(Frame {
            x: 0,
            y: 0,
            width: config.canvas.width,
            height: config.canvas.height,
        });
        let (x, y) = layout::centered_origin(&work_area, config.canvas);

        let hwnd = unsafe {
            CreateWindowExW(
                overlay_ex_style(),
                app.class(),
                PCWSTR::null(),
                WS_POPUP,
                x,
                y,
                config.canvas.width,
                config.canvas.height,
                None,
                None,
                Some(app.hinstance),
                None,
            )
        }
        .map_err(|e| WindowError::Create(e.to_string()))?;

        unsafe {
            SetWindowLongPtrW(hwnd, GWLP_USERDATA, &*state as *const PaintState as isize);
            // Fully transparent until the fade starts
            let _ = SetLayeredWindowAttributes(hwnd, COLORREF(0), 0, LWA_ALPHA);
            let radius = config.corner_radius * 2;
            let region = CreateRoundRectRgn(
                0,
                0,
                config.canvas.width + 1,
                config.canvas.height + 1,
                radius,
                radius,
            );
            // Region owned by the system after this call
            SetWindowRgn(hwnd, Some(region), false);
        }

        info!(x, y, status = ?status, "Toast window created");
        Ok(Self {
            hwnd,
            _state: state,
        })
    }

    pub fn show(&self) {
        unsafe {
            let _ = ShowWindow(self.hwnd, SW_SHOWNOACTIVATE);
            let _ = UpdateWindow(self.hwnd);
        }
    }

    /// Arm the one-shot hold timer
    fn schedule(&self, delay_ms: u32) {
        unsafe {
            SetTimer(Some(self.hwnd), HOLD_TIMER_ID, delay_ms, None);
        }
    }

    /// Pump messages until the hold timer fires
    /// Returns false on WM_QUIT or message loop error
    fn wait_for_timer(&self) -> bool {
        let mut msg = MSG::default();
        loop {
            let ret = unsafe { GetMessageW(&mut msg, None, 0, 0) };
            if ret.0 <= 0 {
                return false;
            }
            if msg.message == WM_TIMER && msg.hwnd == self.hwnd && msg.wParam.0 == HOLD_TIMER_ID {
                unsafe {
                    let _ = KillTimer(Some(self.hwnd), HOLD_TIMER_ID);
                }
                return true;
            }
            unsafe {
                let _ = TranslateMessage(&msg);
                DispatchMessageW(&msg);
            }
        }
    }
}

impl Drop for ToastWindow {
    fn drop(&mut self) {
        unsafe {
            SetWindowLongPtrW(self.hwnd, GWLP_USERDATA, 0);
            let _ = DestroyWindow(self.hwnd);
        }
    }
}

/// Show the toast and drive its timeline to completion
pub fn run(status: Status, icon: Option<&IconPixels>, config: &ToastConfig) -> Result<(), WindowError> {
    let app = App::init()?;
    let window = ToastWindow::create(&app, status, icon, config)?;
    window.show();

    let mut timeline = Timeline::new(config.timeline);
    let mut step = timeline.start();
    loop {
        debug!(phase = ?timeline.phase(), "Timeline stage");
        match step {
            Step::Fade(fade) => run_fade(window.hwnd, &fade, config.panel_opacity),
            Step::Wait(delay) => {
                window.schedule(delay.as_millis() as u32);
                if !window.wait_for_timer() {
                    warn!("Message loop ended early");
                    break;
                }
            }
            Step::Exit => break,
        }
        step = timeline.complete();
    }

    info!("Toast dismissed");
    Ok(())
}
