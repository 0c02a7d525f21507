use crate::device::PlotDevice;
use crate::foundation::core::DashPattern;
use crate::foundation::error::PlotResult;
use crate::render::attributes::Attribute;
use crate::render::plotter::Plotter;

impl<D: PlotDevice> Plotter<D> {
    /// Draw one segment with the least pen travel.
    ///
    /// A fatness or dash state different from the interpreter's is installed for this segment
    /// only and restored afterwards. Dashed segments keep their direction.
    pub(crate) fn optimized_vector(
        &mut self,
        from: (i32, i32),
        to: (i32, i32),
        fat: i32,
        dash_on: bool,
    ) -> PlotResult<()> {
        if fat < 0 {
            return Ok(());
        }
        if from == to && !self.pen.lost && from == self.pen.last {
            return Ok(());
        }

        let fat_changed = fat != self.interp.fat;
        if fat_changed {
            self.device.fat(self.profile.device_fat(fat))?;
            self.pen.lose();
        }
        let dash_changed = dash_on != self.interp.dash_on;
        if dash_changed {
            let attr = self.dash_attribute(dash_on);
            self.apply_attribute(&attr)?;
        }

        let (mut a, mut b) = (from, to);
        if !self.pen.lost && !dash_on && self.pen.travel_to(b) < self.pen.travel_to(a) {
            std::mem::swap(&mut a, &mut b);
        }
        if a != self.pen.last || self.pen.lost {
            self.plot_point(a, false)?;
        }
        self.plot_point(b, true)?;

        if fat_changed {
            self.device.fat(self.profile.device_fat(self.interp.fat))?;
            self.pen.lose();
        }
        if dash_changed {
            let attr = self.dash_attribute(self.interp.dash_on);
            self.apply_attribute(&attr)?;
        }
        Ok(())
    }

    fn dash_attribute(&self, on: bool) -> Attribute {
        if on {
            Attribute::Dash(self.interp.dashes.clone())
        } else {
            Attribute::Dash(DashPattern::solid())
        }
    }

    /// Raw move or draw. The attribute cache is invalidated and the pen position becomes known.
    pub(crate) fn plot_point(&mut self, (x, y): (i32, i32), draw: bool) -> PlotResult<()> {
        self.attrs.invalidate();
        let to = self.profile.inch_point(x, y);
        if draw {
            self.device.draw_to(to)?;
        } else {
            self.device.move_to(to)?;
        }
        self.pen.last = (x, y);
        self.pen.lost = false;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/vector.rs"]
mod tests;
