pub const PALETTE: [&str; 4] = ["#10b981", "#06b6d4", "#8b5cf6", "#f59e0b"];

pub fn palette_color(index: i64) -> &'static str {
    let len = PALETTE.len() as u64;
    // `len` is tiny, the remainder always fits back into usize.
    let slot = (index.unsigned_abs() % len) as usize;
    PALETTE[slot]
}
