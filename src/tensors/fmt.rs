use super::Tensor;
use core::fmt;

fn write_row<T: fmt::Display>(f: &mut fmt::Formatter<'_>, row: &[T]) -> fmt::Result {
    for (j, x) in row.iter().enumerate() {
        if j > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{x}")?;
    }
    Ok(())
}

/// Braced, space-separated rendering.
///
/// Rank 1 prints `{a b c}`, rank 2 prints one row per line, rank 3 prints
/// one braced block per leading index; other ranks print the flat buffer.
impl<T: fmt::Display, const R: usize> fmt::Display for Tensor<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shape: &[usize] = &self.shape;
        match R {
            2 => {
                f.write_str("{\n")?;
                let cols = shape[1];
                if cols > 0 {
                    for row in self.data.chunks(cols) {
                        write_row(f, row)?;
                        f.write_str("\n")?;
                    }
                }
                f.write_str("}")
            }
            3 => {
                f.write_str("{\n")?;
                let (blocks, cols) = (shape[0], shape[2]);
                let plane = shape[1] * cols;
                for b in 0..blocks {
                    f.write_str("{\n")?;
                    if cols > 0 {
                        for row in self.data[b * plane..(b + 1) * plane].chunks(cols) {
                            write_row(f, row)?;
                            f.write_str("\n")?;
                        }
                    }
                    f.write_str("}")?;
                    if b + 1 < blocks {
                        f.write_str("\n")?;
                    }
                }
                f.write_str("\n}")
            }
            _ => {
                f.write_str("{")?;
                write_row(f, &self.data)?;
                f.write_str("}")
            }
        }
    }
}
