//! Split a resolution into what needs installing and what is already there.

use moo_core::package::Package;
use moo_source::Source;
use moo_util::errors::MooResult;

use crate::resolver::{Resolution, ResolvedPackage};

#[derive(Debug, Default)]
pub struct InstallPlan {
    /// Resolved packages with no installed version, in resolution order.
    pub to_install: Vec<ResolvedPackage>,
    /// Resolved packages paired with the installed package of the same id.
    pub already_installed: Vec<(ResolvedPackage, Package)>,
}

impl InstallPlan {
    /// Any installed version of an id counts as installed; versions are not
    /// compared.
    pub fn new(resolution: Resolution, installed: &dyn Source) -> MooResult<Self> {
        let mut plan = Self::default();
        for resolved in resolution.packages {
            let existing = installed
                .get_packages_with_id(&resolved.package.id)?
                .into_iter()
                .next();
            match existing {
                Some(existing) => plan.already_installed.push((resolved, existing)),
                None => plan.to_install.push(resolved),
            }
        }
        Ok(plan)
    }

    pub fn is_empty(&self) -> bool {
        self.to_install.is_empty()
    }
}
