use super::DrawCmd;

/// Retained draw stream.
///
/// The list survives across frames: the owner clears and refills it only when
/// the picture actually changes, and every presented frame replays whatever is
/// recorded. Renderers compare [`revision`](Self::revision) against the last
/// one they uploaded and skip the upload when nothing changed.
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawCmd>,
    revision: u64,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes all recorded commands. Keeps allocated capacity for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
        self.bump();
    }

    /// Records a command after all existing ones.
    #[inline]
    pub fn push(&mut self, cmd: DrawCmd) {
        self.items.push(cmd);
        self.bump();
    }

    /// Commands in paint order (back-to-front).
    #[inline]
    pub fn items(&self) -> &[DrawCmd] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Changes whenever the list is mutated.
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[inline]
    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::paint::Color;

    #[test]
    fn push_preserves_insertion_order() {
        let mut dl = DrawList::new();
        dl.push_solid_circle(Vec2::new(1.0, 1.0), 2.0, Color::BLACK);
        dl.push_line(Vec2::zero(), Vec2::new(5.0, 0.0), 1.0, Color::BLACK);

        assert_eq!(dl.len(), 2);
        assert!(dl.items()[0].as_circle().is_some());
        assert!(dl.items()[1].as_line().is_some());
    }

    #[test]
    fn every_mutation_bumps_revision() {
        let mut dl = DrawList::new();
        let r0 = dl.revision();
        dl.push_line(Vec2::zero(), Vec2::new(1.0, 1.0), 1.0, Color::WHITE);
        let r1 = dl.revision();
        dl.clear();
        let r2 = dl.revision();

        assert_ne!(r0, r1);
        assert_ne!(r1, r2);
        assert!(dl.is_empty());
    }

    #[test]
    fn reading_does_not_bump_revision() {
        let mut dl = DrawList::new();
        dl.push_solid_circle(Vec2::zero(), 1.0, Color::WHITE);
        let rev = dl.revision();
        let _ = dl.items();
        let _ = dl.len();
        assert_eq!(dl.revision(), rev);
    }
}
