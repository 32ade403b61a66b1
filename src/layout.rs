//! Layout module: icon + label composite centering, window placement

/// Width × height in px
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Positioned rectangle (origin top-left)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Frame {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Frame {
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }
}

/// Resolved positions inside the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastLayout {
    pub icon: Option<Frame>,
    pub label: Frame,
}

/// offset = (outer - inner) / 2
/// Negative when content overflows (stays centered, clipped both sides)
pub fn center_offset(outer: i32, inner: i32) -> i32 {
    (outer - inner) / 2
}

/// Lay out [icon] spacing [label] as one row centered in the panel
/// Each item is vertically centered within the row; no icon → no spacing
pub fn compose(panel: Size, icon: Option<Size>, label: Size, spacing: i32) -> ToastLayout {
    let (icon_w, gap) = match icon {
        Some(size) => (size.width, spacing),
        None => (0, 0),
    };
    let row_w = icon_w + gap + label.width;
    let row_h = icon.map_or(label.height, |size| size.height.max(label.height));

    let row_x = center_offset(panel.width, row_w);
    let row_y = center_offset(panel.height, row_h);

    let icon = icon.map(|size| Frame {
        x: row_x,
        y: row_y + center_offset(row_h, size.height),
        width: size.width,
        height: size.height,
    });
    let label = Frame {
        x: row_x + icon_w + gap,
        y: row_y + center_offset(row_h, label.height),
        width: label.width,
        height: label.height,
    };

    ToastLayout { icon, label }
}

/// Window origin centering `size` inside a work area frame
pub fn centered_origin(work_area: &Frame, size: Size) -> (i32, i32) {
    (
        work_area.x + center_offset(work_area.width, size.width),
        work_area.y + center_offset(work_area.height, size.height),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const PANEL: Size = Size::new(640, 480);

    #[test]
    fn test_center_offset() {
        assert_eq!(center_offset(640, 100), 270);
        assert_eq!(center_offset(480, 480), 0);
        assert_eq!(center_offset(100, 140), -20);
    }

    #[test]
    fn test_compose_icon_and_label() {
        let layout = compose(PANEL, Some(Size::new(32, 32)), Size::new(128, 42), 12);

        // row: 32 + 12 + 128 = 172 wide, 42 high
        let icon = layout.icon.unwrap();
        assert_eq!(icon, Frame { x: 234, y: 224, width: 32, height: 32 });
        assert_eq!(layout.label, Frame { x: 278, y: 219, width: 128, height: 42 });
    }

    #[test]
    fn test_compose_label_only() {
        let layout = compose(PANEL, None, Size::new(128, 42), 12);
        assert!(layout.icon.is_none());
        assert_eq!(layout.label, Frame { x: 256, y: 219, width: 128, height: 42 });
    }

    #[test]
    fn test_compose_icon_taller_than_label() {
        let layout = compose(PANEL, Some(Size::new(64, 64)), Size::new(100, 20), 12);
        let icon = layout.icon.unwrap();
        assert_eq!(icon.y, center_offset(480, 64));
        // label centered on the icon's row
        assert_eq!(layout.label.y, icon.y + center_offset(64, 20));
    }

    #[test]
    fn test_compose_is_centered_for_any_label_width() {
        for label_w in [0, 1, 57, 128, 333, 600] {
            let layout = compose(PANEL, Some(Size::new(32, 32)), Size::new(label_w, 42), 12);
            let icon = layout.icon.unwrap();
            let left_margin = icon.x;
            let right_margin = PANEL.width - layout.label.right();
            assert!(
                (left_margin - right_margin).abs() <= 1,
                "label_w={label_w}: {left_margin} vs {right_margin}"
            );
            assert_eq!(left_margin, center_offset(PANEL.width, 32 + 12 + label_w));
        }
    }

    #[test]
    fn test_compose_spacing_between_icon_and_label() {
        let layout = compose(PANEL, Some(Size::new(32, 32)), Size::new(90, 40), 12);
        assert_eq!(layout.label.x - layout.icon.unwrap().right(), 12);
    }

    #[test]
    fn test_centered_origin() {
        let work_area = Frame { x: 0, y: 0, width: 1920, height: 1040 };
        assert_eq!(centered_origin(&work_area, PANEL), (640, 280));
    }

    #[test]
    fn test_centered_origin_offset_work_area() {
        let work_area = Frame { x: 100, y: 40, width: 1280, height: 680 };
        assert_eq!(centered_origin(&work_area, PANEL), (420, 140));
    }
}
