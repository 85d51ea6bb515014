//! Inbound Ports (Driving Ports)
//!
//! [`MembershipFilter`] lets callers work with a fixed-size [`Filter`] or a
//! growing [`ScalableFilter`] through one interface.

use crate::domain::{Filter, ScalableFilter};
use crate::error::FilterError;

/// Approximate set membership (Driving Port)
pub trait MembershipFilter {
    /// Add an element
    ///
    /// Only a growing filter can fail, see [`ScalableFilter::feed`].
    fn insert(&mut self, element: &[u8]) -> Result<(), FilterError>;

    /// Test if an element might have been inserted
    ///
    /// Never returns `false` for an inserted element.
    fn contains(&self, element: &[u8]) -> bool;

    /// Insert every element, stopping at the first failure
    fn insert_all<I, T>(&mut self, elements: I) -> Result<(), FilterError>
    where
        Self: Sized,
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        for element in elements {
            self.insert(element.as_ref())?;
        }
        Ok(())
    }
}

impl MembershipFilter for Filter {
    fn insert(&mut self, element: &[u8]) -> Result<(), FilterError> {
        self.feed(element);
        Ok(())
    }

    fn contains(&self, element: &[u8]) -> bool {
        self.matches(element)
    }
}

impl MembershipFilter for ScalableFilter {
    fn insert(&mut self, element: &[u8]) -> Result<(), FilterError> {
        self.feed(element).map(|_| ())
    }

    fn contains(&self, element: &[u8]) -> bool {
        self.matches(element)
    }
}
