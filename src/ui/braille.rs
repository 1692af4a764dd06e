/// Braille canvas for high-resolution terminal rendering
/// Each terminal cell contains a 2×4 grid of Braille dots
/// This gives us 2× horizontal and 4× vertical resolution

use ratatui::style::Color;

// 3×5 glyphs for 0-9, one row per entry, most significant bit on the left
const DIGITS: [[u8; 5]; 10] = [
    [0b111, 0b101, 0b101, 0b101, 0b111],
    [0b010, 0b110, 0b010, 0b010, 0b111],
    [0b111, 0b001, 0b111, 0b100, 0b111],
    [0b111, 0b001, 0b111, 0b001, 0b111],
    [0b101, 0b101, 0b111, 0b001, 0b001],
    [0b111, 0b100, 0b111, 0b001, 0b111],
    [0b111, 0b100, 0b111, 0b101, 0b111],
    [0b111, 0b001, 0b010, 0b010, 0b010],
    [0b111, 0b101, 0b111, 0b101, 0b111],
    [0b111, 0b101, 0b111, 0b001, 0b111],
];

/// Pixels per glyph dot
const DIGIT_SCALE_X: usize = 3;
const DIGIT_SCALE_Y: usize = 3;

/// Width of one rendered digit plus spacing, in pixels
pub const DIGIT_ADVANCE: usize = 3 * DIGIT_SCALE_X + 3;
/// Height of one rendered digit, in pixels
pub const DIGIT_HEIGHT: usize = 5 * DIGIT_SCALE_Y;

pub struct BrailleCanvas {
    width: usize,  // Width in terminal cells
    height: usize, // Height in terminal cells
    dots: Vec<Vec<u8>>, // 2D array of dot patterns (0-255)
    colors: Vec<Vec<Color>>,
    pen: Color,
}

impl BrailleCanvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            dots: vec![vec![0; width]; height],
            colors: vec![vec![Color::White; width]; height],
            pen: Color::White,
        }
    }

    /// Color for every pixel set from now on; a cell takes the color of its
    /// most recent pixel
    pub fn set_pen(&mut self, color: Color) {
        self.pen = color;
    }

    /// Set a dot at pixel coordinates
    /// pixel_x: 0 to (width * 2 - 1)
    /// pixel_y: 0 to (height * 4 - 1)
    pub fn set_pixel(&mut self, pixel_x: usize, pixel_y: usize) {
        let cell_x = pixel_x / 2;
        let cell_y = pixel_y / 4;

        if cell_x >= self.width || cell_y >= self.height {
            return;
        }

        let dot_x = pixel_x % 2; // 0 or 1 (left or right column)
        let dot_y = pixel_y % 4; // 0, 1, 2, or 3 (row within cell)

        // Braille dot numbering:
        // 1 4
        // 2 5
        // 3 6
        // 7 8
        let dot_index = match (dot_x, dot_y) {
            (0, 0) => 0, // dot 1
            (0, 1) => 1, // dot 2
            (0, 2) => 2, // dot 3
            (0, 3) => 6, // dot 7
            (1, 0) => 3, // dot 4
            (1, 1) => 4, // dot 5
            (1, 2) => 5, // dot 6
            (1, 3) => 7, // dot 8
            _ => unreachable!(),
        };

        self.dots[cell_y][cell_x] |= 1 << dot_index;
        self.colors[cell_y][cell_x] = self.pen;
    }

    /// Fill a rectangle with pixels
    pub fn fill_rect(&mut self, x: usize, y: usize, width: usize, height: usize) {
        for py in y..(y + height) {
            for px in x..(x + width) {
                self.set_pixel(px, py);
            }
        }
    }

    /// Solid line across the full canvas width
    pub fn draw_horizontal_line(&mut self, pixel_y: usize) {
        for px in 0..self.pixel_width() {
            self.set_pixel(px, pixel_y);
        }
    }

    /// Solid line from `y_start` up to (not including) `y_end`
    pub fn draw_vertical_line(&mut self, pixel_x: usize, y_start: usize, y_end: usize) {
        for py in y_start..y_end {
            self.set_pixel(pixel_x, py);
        }
    }

    /// Draw a single digit with its top-left corner at (x, y)
    pub fn draw_digit(&mut self, digit: u8, x: usize, y: usize) {
        let glyph = match DIGITS.get(digit as usize) {
            Some(glyph) => glyph,
            None => return,
        };

        for (row, bits) in glyph.iter().enumerate() {
            for col in 0..3 {
                if bits & (0b100 >> col) != 0 {
                    self.fill_rect(
                        x + col * DIGIT_SCALE_X,
                        y + row * DIGIT_SCALE_Y,
                        DIGIT_SCALE_X,
                        DIGIT_SCALE_Y,
                    );
                }
            }
        }
    }

    /// Draw a number centered on `center_x`
    pub fn draw_number(&mut self, value: u8, center_x: usize, y: usize) {
        let text = value.to_string();
        let width = text.len() * DIGIT_ADVANCE;
        let mut x = center_x.saturating_sub(width / 2);
        for c in text.bytes() {
            self.draw_digit(c - b'0', x, y);
            x += DIGIT_ADVANCE;
        }
    }

    /// Convert dot pattern to Braille character
    /// Braille Unicode: U+2800 + dot pattern
    pub fn to_char(&self, cell_x: usize, cell_y: usize) -> char {
        if cell_x >= self.width || cell_y >= self.height {
            return ' ';
        }

        let pattern = self.dots[cell_y][cell_x];
        char::from_u32(0x2800 + pattern as u32).unwrap_or(' ')
    }

    pub fn color_at(&self, cell_x: usize, cell_y: usize) -> Color {
        self.colors
            .get(cell_y)
            .and_then(|row| row.get(cell_x))
            .copied()
            .unwrap_or(Color::White)
    }

    /// Width in terminal cells
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in terminal cells
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get width in pixels (2 per cell)
    pub fn pixel_width(&self) -> usize {
        self.width * 2
    }

    /// Get height in pixels (4 per cell)
    pub fn pixel_height(&self) -> usize {
        self.height * 4
    }
}
