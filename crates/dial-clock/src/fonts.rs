//! Font roles used by the three hands.

use dial_engine::text::{FontId, FontSystem};

use crate::config::FontSources;

/// Weight a hand's numerals are set in.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum FontRole {
    Light,
    Regular,
    Black,
}

impl FontRole {
    pub const ALL: [FontRole; 3] = [FontRole::Light, FontRole::Regular, FontRole::Black];

    fn slot(self) -> usize {
        match self {
            FontRole::Light => 0,
            FontRole::Regular => 1,
            FontRole::Black => 2,
        }
    }
}

/// Which loaded font serves each role.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct FaceFonts {
    ids: [Option<FontId>; 3],
}

impl FaceFonts {
    /// Loads each role's first usable candidate into `fonts`.
    ///
    /// Roles whose candidates all fail are left empty and logged; they borrow
    /// another role's font at draw time. Roles with identical candidate lists
    /// share one loaded font.
    pub fn load(sources: &FontSources, fonts: &mut FontSystem) -> Self {
        let owners = shared_roles(sources);
        let mut out = Self::default();
        for role in FontRole::ALL {
            let owner = owners[role.slot()];
            if owner != role {
                if let Some(id) = out.ids[owner.slot()] {
                    out.set(role, id);
                }
                continue;
            }
            match fonts.load_first(sources.for_role(role)) {
                Ok(id) => {
                    log::info!("{role:?} font loaded as {id:?}");
                    out.set(role, id);
                }
                Err(e) => log::warn!("no {role:?} font: {e}"),
            }
        }
        if out.is_empty() {
            log::warn!("no fonts loaded; numerals will not be drawn");
        }
        out
    }

    pub fn set(&mut self, role: FontRole, id: FontId) {
        self.ids[role.slot()] = Some(id);
    }

    pub fn is_empty(&self) -> bool {
        self.ids.iter().all(Option::is_none)
    }

    /// The role's own font, else the nearest loaded one (regular first).
    pub fn resolve(&self, role: FontRole) -> Option<FontId> {
        self.ids[role.slot()]
            .or(self.ids[FontRole::Regular.slot()])
            .or_else(|| self.ids.iter().flatten().copied().next())
    }
}

/// For each role, the first role with the same candidate list.
fn shared_roles(sources: &FontSources) -> [FontRole; 3] {
    FontRole::ALL.map(|role| {
        FontRole::ALL
            .into_iter()
            .find(|other| sources.for_role(*other) == sources.for_role(role))
            .unwrap_or(role)
    })
}
