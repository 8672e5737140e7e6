use super::size::Size;

/// What a partial update does to one field.
///
/// `Unset` leaves the field out of the write entirely, `Clear` writes an explicit
/// null.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate<T> {
    Unset,
    Clear,
    Set(T),
}

impl<T> Default for FieldUpdate<T> {
    fn default() -> Self {
        FieldUpdate::Unset
    }
}

impl<T> FieldUpdate<T> {
    pub fn is_unset(&self) -> bool {
        matches!(self, FieldUpdate::Unset)
    }
}

impl<T> From<Option<T>> for FieldUpdate<T> {
    /// `None` maps to `Unset`; use `FieldUpdate::Clear` to write a null.
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => FieldUpdate::Set(v),
            None => FieldUpdate::Unset,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueUpdate {
    pub assignee: FieldUpdate<String>,
    pub size: FieldUpdate<Size>,
    pub sprint: FieldUpdate<u64>,
}

impl IssueUpdate {
    pub fn is_empty(&self) -> bool {
        self.assignee.is_unset() && self.size.is_unset() && self.sprint.is_unset()
    }

    /// Zero the estimate and take the issue out of whatever sprint holds it.
    pub fn drop_from_sprint() -> Self {
        Self {
            assignee: FieldUpdate::Unset,
            size: FieldUpdate::Set(Size::Zero),
            sprint: FieldUpdate::Clear,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_update_touches_nothing() {
        assert!(IssueUpdate::default().is_empty());
    }

    #[test]
    fn clearing_is_not_unset() {
        let update = IssueUpdate::drop_from_sprint();
        assert!(!update.is_empty());
        assert_eq!(update.sprint, FieldUpdate::Clear);
        assert_ne!(update.sprint, FieldUpdate::Unset);
    }

    #[test]
    fn none_means_leave_untouched() {
        let sprint: FieldUpdate<u64> = None.into();
        assert_eq!(sprint, FieldUpdate::Unset);
        let sprint: FieldUpdate<u64> = Some(12).into();
        assert_eq!(sprint, FieldUpdate::Set(12));
    }
}
