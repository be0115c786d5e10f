//! Approver signature table.
//!
//! Two layouts share one builder:
//!
//! - **Affiliation columns** (meeting minutes): one column per approver,
//!   grouped under a header cell per organisation. The home organisation
//!   comes first, the rest alphabetically. Rows: header, names, signatures.
//! - **Role rows** (justifications): one row per approver, grouped by role in
//!   a fixed order, with the role label merged down the group. Every role is
//!   always present; a role with nobody in it gets one empty row.

use super::style::DocumentStyle;
use crate::input::{Approver, ApproverCategory, DocumentKind};
use crate::model::{Alignment, Paragraph, Table, TableCell, TableRow, TextRun, VerticalMerge};
use log::debug;
use std::collections::BTreeMap;

/// Grouping dimension of the approver table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApproverLayout {
    /// Columns grouped by affiliation, `home` sorted first
    ByAffiliation {
        /// The organisation issuing the document
        home: Option<String>,
    },

    /// Rows grouped by role, in the given order
    ByRole {
        /// Roles to show
        roles: Vec<ApproverCategory>,
    },
}

impl ApproverLayout {
    /// Layout used by a document kind.
    pub fn for_kind(kind: DocumentKind) -> Self {
        match kind {
            DocumentKind::MeetingMinutes => ApproverLayout::ByAffiliation { home: None },
            DocumentKind::Justification => ApproverLayout::ByRole {
                roles: ApproverCategory::ALL.to_vec(),
            },
        }
    }

    /// Affiliation columns with `home` first.
    pub fn by_affiliation(home: impl Into<String>) -> Self {
        ApproverLayout::ByAffiliation {
            home: Some(home.into()),
        }
    }

    /// Fill an unset home organisation with `fallback`, if it is not blank.
    pub fn or_home(self, fallback: Option<&str>) -> Self {
        match self {
            ApproverLayout::ByAffiliation { home: None } => ApproverLayout::ByAffiliation {
                home: fallback
                    .map(str::trim)
                    .filter(|h| !h.is_empty())
                    .map(str::to_string),
            },
            other => other,
        }
    }
}

/// Partition `items` by `key`, keeping input order inside each group.
fn group_by<'a, T, K, F>(items: &'a [T], key: F) -> BTreeMap<K, Vec<&'a T>>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    let mut groups: BTreeMap<K, Vec<&T>> = BTreeMap::new();
    for item in items {
        groups.entry(key(item)).or_default().push(item);
    }
    groups
}

/// Builds the approver table for either layout.
pub struct ApproverTableBuilder<'a> {
    style: &'a DocumentStyle,
}

impl<'a> ApproverTableBuilder<'a> {
    /// Create a builder using `style`.
    pub fn new(style: &'a DocumentStyle) -> Self {
        Self { style }
    }

    /// Build the table, or `None` when the layout has nothing to show.
    pub fn build(&self, approvers: &[Approver], layout: &ApproverLayout) -> Option<Table> {
        match layout {
            ApproverLayout::ByAffiliation { home } => {
                self.by_affiliation(approvers, home.as_deref())
            }
            ApproverLayout::ByRole { roles } => self.by_role(approvers, roles),
        }
    }

    fn by_affiliation(&self, approvers: &[Approver], home: Option<&str>) -> Option<Table> {
        if approvers.is_empty() {
            debug!("no approvers, skipping approver table");
            return None;
        }

        let home = home.map(str::trim).filter(|h| !h.is_empty());
        // (not home, name) sorts the home organisation first
        let groups = group_by(approvers, |a| {
            let affiliation = a.affiliation.trim().to_string();
            (Some(affiliation.as_str()) != home, affiliation)
        });

        let mut header = Vec::new();
        let mut names = Vec::new();
        let mut signatures = Vec::new();
        for ((_, affiliation), members) in &groups {
            let label = if affiliation.is_empty() {
                self.style.labels.placeholder.as_str()
            } else {
                affiliation.as_str()
            };
            let span = u16::try_from(members.len()).unwrap_or(u16::MAX);
            header.push(self.label_cell(label).span(span));
            for member in members {
                names.push(self.name_cell(member));
                signatures.push(self.cell(Paragraph::empty()));
            }
        }

        let columns = names.len();
        let mut table = Table::with_header(1).widths(equal_shares(columns));
        table.add_row(TableRow::header(header));
        table.add_row(TableRow::new(names));
        table.add_row(TableRow::new(signatures));
        Some(table)
    }

    fn by_role(&self, approvers: &[Approver], roles: &[ApproverCategory]) -> Option<Table> {
        if roles.is_empty() {
            return None;
        }
        for approver in approvers.iter().filter(|a| !roles.contains(&a.category)) {
            debug!(
                "approver {} has role {} outside the layout, dropped",
                approver.name, approver.category
            );
        }

        let groups = group_by(approvers, |a| a.category);
        let mut table = Table::new().widths(self.style.role_widths.to_vec());
        for role in roles {
            let members = groups.get(role).map(Vec::as_slice).unwrap_or_default();
            if members.is_empty() {
                table.add_row(TableRow::new(vec![
                    self.label_cell(role.label()).merge(VerticalMerge::Start),
                    self.cell(Paragraph::empty()),
                    self.cell(Paragraph::empty()),
                    self.cell(Paragraph::empty()),
                ]));
                continue;
            }
            for (i, member) in members.iter().enumerate() {
                let label = if i == 0 {
                    self.label_cell(role.label()).merge(VerticalMerge::Start)
                } else {
                    self.label_cell("").merge(VerticalMerge::Continue)
                };
                table.add_row(TableRow::new(vec![
                    label,
                    self.name_cell(member),
                    self.cell(Paragraph::with_text(self.affiliation_text(member))),
                    self.cell(Paragraph::empty()),
                ]));
            }
        }
        Some(table)
    }

    fn cell(&self, paragraph: Paragraph) -> TableCell {
        TableCell::paragraph(paragraph.align(Alignment::Center)).bordered(self.style.cell_borders())
    }

    fn label_cell(&self, text: &str) -> TableCell {
        self.cell(Paragraph::from_runs(vec![TextRun::bold(text)]))
            .shade(self.style.header_shading.clone())
    }

    fn name_cell(&self, approver: &Approver) -> TableCell {
        let mut p = Paragraph::with_text(approver.name.as_str());
        if let Some(id) = approver.secondary_id.as_deref().filter(|s| !s.trim().is_empty()) {
            p.add_line_break();
            p.add_text(id);
        }
        self.cell(p)
    }

    fn affiliation_text<'b>(&'b self, approver: &'b Approver) -> &'b str {
        let affiliation = approver.affiliation.trim();
        if affiliation.is_empty() {
            &self.style.labels.placeholder
        } else {
            affiliation
        }
    }
}

/// `n` equal percentages summing to exactly 100.
fn equal_shares(n: usize) -> Vec<f32> {
    if n == 0 {
        return Vec::new();
    }
    let share = (10_000 / n) as f32 / 100.0;
    let mut widths = vec![share; n];
    widths[n - 1] = 100.0 - share * (n - 1) as f32;
    widths
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Block;

    fn approver(name: &str, category: ApproverCategory, affiliation: &str) -> Approver {
        Approver::new(name, category, affiliation)
    }

    fn roles() -> ApproverLayout {
        ApproverLayout::for_kind(DocumentKind::Justification)
    }

    #[test]
    fn test_group_by_keeps_input_order() {
        let groups = group_by(&[3, 1, 4, 1, 5, 9, 2, 6], |n| n % 2);
        assert_eq!(groups[&0], vec![&4, &2, &6]);
        assert_eq!(groups[&1], vec![&3, &1, &1, &5, &9]);
    }

    #[test]
    fn test_equal_shares_sum_to_100() {
        for n in 1..=9 {
            let widths = equal_shares(n);
            assert_eq!(widths.len(), n);
            let total: f32 = widths.iter().sum();
            assert!((total - 100.0).abs() < 0.01, "n={} total={}", n, total);
        }
    }

    #[test]
    fn test_role_layout_alice_scenario() {
        let style = DocumentStyle::default();
        let approvers = [approver("Alice", ApproverCategory::Initiator, "Acme")];
        let table = ApproverTableBuilder::new(&style)
            .build(&approvers, &roles())
            .unwrap();

        assert_eq!(table.row_count(), 3);
        assert_eq!(table.rows[0].cells[0].plain_text(), "Initiator");
        assert_eq!(table.rows[0].cells[1].plain_text(), "Alice");
        assert_eq!(table.rows[0].cells[2].plain_text(), "Acme");

        for (row, label) in table.rows[1..].iter().zip(["Reviewer", "Final Approver"]) {
            assert_eq!(row.cells[0].plain_text(), label);
            assert_eq!(row.cells[0].vertical_merge, Some(VerticalMerge::Start));
            assert!(row.cells[1..].iter().all(TableCell::is_empty));
        }
        assert_eq!(table.column_widths, Some(vec![20.0, 30.0, 30.0, 20.0]));
    }

    #[test]
    fn test_role_label_merged_down_group() {
        let style = DocumentStyle::default();
        let approvers = [
            approver("R1", ApproverCategory::Reviewer, "A"),
            approver("I1", ApproverCategory::Initiator, "A"),
            approver("R2", ApproverCategory::Reviewer, "B"),
            approver("R3", ApproverCategory::Reviewer, "B"),
        ];
        let table = ApproverTableBuilder::new(&style)
            .build(&approvers, &roles())
            .unwrap();

        // initiator, 3 reviewers, empty final approver
        assert_eq!(table.row_count(), 5);
        let merges: Vec<_> = table.rows.iter().map(|r| r.cells[0].vertical_merge).collect();
        assert_eq!(
            merges,
            vec![
                Some(VerticalMerge::Start),
                Some(VerticalMerge::Start),
                Some(VerticalMerge::Continue),
                Some(VerticalMerge::Continue),
                Some(VerticalMerge::Start),
            ]
        );
        let names: Vec<_> = table.rows[1..4]
            .iter()
            .map(|r| r.cells[1].plain_text())
            .collect();
        assert_eq!(names, vec!["R1", "R2", "R3"]);
        assert!(table.is_rectangular());
    }

    #[test]
    fn test_role_layout_drops_unlisted_roles() {
        let style = DocumentStyle::default();
        let layout = ApproverLayout::ByRole {
            roles: vec![ApproverCategory::Initiator, ApproverCategory::FinalApprover],
        };
        let approvers = [approver("R", ApproverCategory::Reviewer, "A")];
        let table = ApproverTableBuilder::new(&style)
            .build(&approvers, &layout)
            .unwrap();
        assert_eq!(table.row_count(), 2);
        assert!(!table.plain_text().contains('R'));
    }

    #[test]
    fn test_affiliation_layout_home_first_then_alphabetical() {
        let style = DocumentStyle::default();
        let approvers = [
            approver("Zed", ApproverCategory::Reviewer, "Zenith"),
            approver("Bob", ApproverCategory::Reviewer, "Home Co"),
            approver("Amy", ApproverCategory::Reviewer, "Alpha"),
            approver("Ann", ApproverCategory::Reviewer, "Home Co"),
        ];
        let table = ApproverTableBuilder::new(&style)
            .build(&approvers, &ApproverLayout::by_affiliation("Home Co"))
            .unwrap();

        let header: Vec<_> = table.rows[0]
            .cells
            .iter()
            .map(|c| (c.plain_text(), c.column_span))
            .collect();
        assert_eq!(
            header,
            vec![
                ("Home Co".to_string(), 2),
                ("Alpha".to_string(), 1),
                ("Zenith".to_string(), 1)
            ]
        );

        let names: Vec<_> = table.rows[1].cells.iter().map(TableCell::plain_text).collect();
        assert_eq!(names, vec!["Bob", "Ann", "Amy", "Zed"]);
        assert_eq!(table.rows[2].cells.len(), 4);
        assert!(table.is_rectangular());
        assert_eq!(table.column_widths, Some(vec![25.0; 4]));
    }

    #[test]
    fn test_affiliation_layout_secondary_id_on_second_line() {
        let style = DocumentStyle::default();
        let approvers =
            [approver("Kim", ApproverCategory::Reviewer, "").with_secondary_id("E-042")];
        let table = ApproverTableBuilder::new(&style)
            .build(&approvers, &ApproverLayout::ByAffiliation { home: None })
            .unwrap();

        assert_eq!(table.rows[0].cells[0].plain_text(), "-");
        match &table.rows[1].cells[0].content[0] {
            Block::Paragraph(p) => assert_eq!(p.plain_text(), "Kim\nE-042"),
            other => panic!("expected paragraph, got {:?}", other),
        }
    }

    #[test]
    fn test_affiliation_layout_empty_is_none() {
        let style = DocumentStyle::default();
        assert!(ApproverTableBuilder::new(&style)
            .build(&[], &ApproverLayout::ByAffiliation { home: None })
            .is_none());
    }

    #[test]
    fn test_affiliation_layout_home_is_trimmed() {
        let style = DocumentStyle::default();
        let approvers = [
            approver("Amy", ApproverCategory::Reviewer, "Alpha"),
            approver("Bob", ApproverCategory::Reviewer, "Acme "),
        ];
        let table = ApproverTableBuilder::new(&style)
            .build(&approvers, &ApproverLayout::by_affiliation(" Acme"))
            .unwrap();
        assert_eq!(table.rows[0].plain_text(), "Acme\tAlpha");
    }

    #[test]
    fn test_or_home_fills_only_unset_home() {
        let unset = ApproverLayout::ByAffiliation { home: None };
        assert_eq!(
            unset.clone().or_home(Some(" Zeta Corp ")),
            ApproverLayout::by_affiliation("Zeta Corp")
        );
        assert_eq!(unset.clone().or_home(Some("  ")), unset);
        assert_eq!(unset.clone().or_home(None), unset);

        let explicit = ApproverLayout::by_affiliation("Acme");
        assert_eq!(explicit.clone().or_home(Some("Zeta Corp")), explicit);

        let roles = ApproverLayout::for_kind(DocumentKind::Justification);
        assert_eq!(roles.clone().or_home(Some("Zeta Corp")), roles);
    }

    #[test]
    fn test_header_span_counts_members() {
        let style = DocumentStyle::default();
        let approvers: Vec<_> = (0..3)
            .map(|i| approver(&format!("N{}", i), ApproverCategory::Reviewer, "Acme"))
            .collect();
        let table = ApproverTableBuilder::new(&style)
            .build(&approvers, &ApproverLayout::ByAffiliation { home: None })
            .unwrap();
        assert_eq!(table.rows[0].cells[0].column_span, 3);
        assert!(table.is_rectangular());
    }
}
