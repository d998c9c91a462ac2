//! Position counting and totals over the element tree of a project.

use crate::model::{ElementDto, ProjectDto};

/// Counts every [`ElementDto::Position`] in `elements`, at any nesting depth.
///
/// Walks the tree with an explicit stack so arbitrarily deep groups cannot
/// exhaust the call stack. Groups without children and unknown element kinds
/// contribute nothing.
pub fn count_positions(elements: &[ElementDto]) -> usize {
    let mut count = 0;
    let mut pending: Vec<&[ElementDto]> = vec![elements];

    while let Some(level) = pending.pop() {
        for element in level {
            match element {
                ElementDto::Position(_) => count += 1,
                ElementDto::Group(group) => {
                    if let Some(children) = group.elements.as_deref() {
                        pending.push(children);
                    }
                }
                ElementDto::Unknown => {}
            }
        }
    }

    count
}

/// Number of positions in the first service specification of `project`.
pub fn project_position_count(project: &ProjectDto) -> usize {
    project
        .service_specifications
        .as_deref()
        .and_then(|specs| specs.first())
        .and_then(|spec| spec.elements.as_deref())
        .map(count_positions)
        .unwrap_or(0)
}

/// Net total price of the first service specification of `project`, or 0.
pub fn project_total_price(project: &ProjectDto) -> f64 {
    project
        .service_specifications
        .as_deref()
        .and_then(|specs| specs.first())
        .map(|spec| spec.total_price)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PositionDto, ServiceSpecificationDto, ServiceSpecificationGroupDto};

    fn position() -> ElementDto {
        ElementDto::Position(PositionDto::default())
    }

    #[test]
    fn unknown_elements_do_not_count() {
        let elements = vec![ElementDto::Unknown, position(), ElementDto::Unknown];
        assert_eq!(count_positions(&elements), 1);
    }

    #[test]
    fn project_helpers_only_look_at_first_service_specification() {
        let project = ProjectDto {
            project_information: None,
            service_specifications: Some(vec![
                ServiceSpecificationDto {
                    total_price: 800.0,
                    elements: Some(vec![
                        position(),
                        ElementDto::Group(ServiceSpecificationGroupDto {
                            elements: Some(vec![position()]),
                            ..Default::default()
                        }),
                    ]),
                    ..Default::default()
                },
                ServiceSpecificationDto {
                    total_price: 5.0,
                    elements: Some(vec![position(), position(), position()]),
                    ..Default::default()
                },
            ]),
        };

        assert_eq!(project_position_count(&project), 2);
        assert_eq!(project_total_price(&project), 800.0);
    }

    #[test]
    fn project_without_service_specifications_is_zero() {
        let project = ProjectDto::default();
        assert_eq!(project_position_count(&project), 0);
        assert_eq!(project_total_price(&project), 0.0);

        let empty = ProjectDto {
            service_specifications: Some(vec![]),
            ..Default::default()
        };
        assert_eq!(project_position_count(&empty), 0);
        assert_eq!(project_total_price(&empty), 0.0);
    }
}
