//! Engine behavior tests: filtering, sorting, pagination and state
//! transitions driven through the public API against a text surface.

use std::sync::{Arc, Mutex};

use chrono::{Duration, TimeZone, Utc};
use poweralert_grid::{
    Alignment, Column, Direction, FilterSet, FilterValue, Grid, GridError, GridOptions,
    TextSurface,
};
use poweralert_model::{Record, Value};

fn outage(id: i64, area: &str, status: &str, affected: i64) -> Record {
    let started = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap() + Duration::hours(id);
    Record::new()
        .set("id", id)
        .set("area", area)
        .set("status", status)
        .set("affected", affected)
        .set("started", started)
}

/// 23 outages: ids 1-10 ONGOING, 11-18 COMPLETED, 19-23 SCHEDULED. Odd ids
/// hit Downtown, even ids Riverside. Affected count grows with the id.
fn outage_board() -> Vec<Record> {
    (1..=23)
        .map(|id| {
            let status = if id <= 10 {
                "ONGOING"
            } else if id <= 18 {
                "COMPLETED"
            } else {
                "SCHEDULED"
            };
            let area = if id % 2 == 1 { "Downtown" } else { "Riverside" };
            outage(id, area, status, id * 10)
        })
        .collect()
}

fn board_columns() -> Vec<Column> {
    vec![
        Column::field("id", "ID").sortable().width(4).align(Alignment::Right),
        Column::field("area", "Area").sortable().width(18),
        Column::field("status", "Status").sortable().width(12),
        Column::field("affected", "Affected")
            .sortable()
            .width(10)
            .align(Alignment::Right),
        Column::field("started", "Started").width(18),
    ]
}

fn make_grid(data: Vec<Record>) -> Grid<TextSurface> {
    let mut grid = Grid::new(
        GridOptions::new(board_columns()).data(data),
        TextSurface::new(),
    )
    .unwrap();
    grid.render();
    grid
}

fn visible_ids(grid: &Grid<TextSurface>) -> Vec<i64> {
    (0..grid.page_rows())
        .map(|row| {
            grid.record_at(row)
                .and_then(|record| record.get_int("id").ok().flatten())
                .unwrap_or(-1)
        })
        .collect()
}

// =============================================================================
// Filtering
// =============================================================================

#[test]
fn test_filters_compose_with_and() {
    let data = vec![
        outage(1, "Downtown", "ONGOING", 120),
        outage(2, "Riverside", "ONGOING", 80),
        outage(3, "Downtown", "COMPLETED", 500),
    ];
    let mut grid = make_grid(data);
    grid.update_filters(
        FilterSet::new()
            .with("status", FilterValue::equals("ONGOING"))
            .with("affected", FilterValue::at_least(100.0)),
    );

    assert_eq!(visible_ids(&grid), vec![1]);
    assert_eq!(grid.state().matching, 1);
    assert_eq!(grid.state().records, 3);
}

#[test]
fn test_inactive_filters_match_everything() {
    let mut grid = make_grid(outage_board());
    grid.update_filters(
        FilterSet::new()
            .with("area", FilterValue::text(""))
            .with("status", FilterValue::one_of(Vec::<Value>::new())),
    );
    assert_eq!(grid.state().matching, 23);
}

#[test]
fn test_update_filters_replaces_wholesale() {
    let mut grid = make_grid(outage_board());
    grid.update_filters(FilterSet::new().with("status", FilterValue::equals("SCHEDULED")));
    assert_eq!(grid.state().matching, 5);

    // The status filter must not linger once a different set is installed.
    grid.update_filters(FilterSet::new().with("area", FilterValue::text("downtown")));
    assert_eq!(grid.state().matching, 12);
}

#[test]
fn test_filter_change_snaps_to_page_one() {
    let mut grid = make_grid(outage_board());
    assert!(grid.go_to_page(3));
    grid.update_filters(FilterSet::new().with("status", FilterValue::equals("ONGOING")));
    assert_eq!(grid.state().current_page, 1);
    assert_eq!(grid.state().matching, 10);
}

#[test]
fn test_no_matches_keeps_pagination_visible_with_zeroes() {
    let mut grid = make_grid(outage_board());
    grid.update_filters(FilterSet::new().with("area", FilterValue::text("atlantis")));

    assert_eq!(grid.state().matching, 0);
    assert_eq!(grid.state().total_pages, 1);
    assert_eq!(grid.surface().body(), "No matching records");
    assert!(grid.surface().pagination().contains("0 of 0"));
}

// =============================================================================
// Sorting
// =============================================================================

#[test]
fn test_sort_ascending_and_descending() {
    let mut grid = make_grid(outage_board());
    grid.set_sort(3, Direction::Desc).unwrap();
    assert_eq!(visible_ids(&grid)[..3], [23, 22, 21]);

    grid.set_sort(3, Direction::Asc).unwrap();
    assert_eq!(visible_ids(&grid)[..3], [1, 2, 3]);
}

#[test]
fn test_sort_is_stable_for_equal_keys() {
    let data = vec![
        outage(1, "Downtown", "ONGOING", 10),
        outage(2, "Downtown", "SCHEDULED", 10),
        outage(3, "Downtown", "ONGOING", 10),
        outage(4, "Downtown", "SCHEDULED", 10),
        outage(5, "Downtown", "ONGOING", 10),
    ];
    let mut grid = make_grid(data);

    // Ascending by status: equal keys keep insertion order.
    grid.set_sort(2, Direction::Asc).unwrap();
    assert_eq!(visible_ids(&grid), vec![1, 3, 5, 2, 4]);

    // Descending flips the groups but not the order inside them.
    grid.set_sort(2, Direction::Desc).unwrap();
    assert_eq!(visible_ids(&grid), vec![2, 4, 1, 3, 5]);
}

#[test]
fn test_missing_values_sort_first_ascending_last_descending() {
    let data = vec![
        Record::new().set("id", 1i64).set("affected", 5i64),
        Record::new().set("id", 2i64),
        Record::new().set("id", 3i64).set("affected", 3i64),
        Record::new().set("id", 4i64).set("affected", Value::Null),
        Record::new().set("id", 5i64).set("affected", 1i64),
    ];
    let mut grid = make_grid(data);

    grid.set_sort(3, Direction::Asc).unwrap();
    assert_eq!(visible_ids(&grid), vec![2, 4, 5, 3, 1]);

    grid.set_sort(3, Direction::Desc).unwrap();
    assert_eq!(visible_ids(&grid), vec![1, 3, 5, 2, 4]);
}

#[test]
fn test_sort_does_not_reset_page() {
    let mut grid = make_grid(outage_board());
    assert!(grid.go_to_page(2));
    grid.set_sort(0, Direction::Desc).unwrap();
    assert_eq!(grid.state().current_page, 2);
}

#[test]
fn test_clear_sort_restores_insertion_order() {
    let mut grid = make_grid(outage_board());
    grid.set_sort(0, Direction::Desc).unwrap();
    assert_eq!(visible_ids(&grid)[..2], [23, 22]);

    grid.clear_sort();
    assert_eq!(grid.state().sort, None);
    assert_eq!(visible_ids(&grid)[..2], [1, 2]);
}

#[test]
fn test_header_click_cycles_direction() {
    let mut grid = make_grid(outage_board());

    let first = grid.click_header(3).unwrap();
    assert_eq!(first.direction, Direction::Asc);
    let second = grid.click_header(3).unwrap();
    assert_eq!(second.direction, Direction::Desc);
    let third = grid.click_header(3).unwrap();
    assert_eq!(third.direction, Direction::Asc);

    // Switching columns starts over ascending.
    let other = grid.click_header(1).unwrap();
    assert_eq!(other.column, 1);
    assert_eq!(other.direction, Direction::Asc);
}

#[test]
fn test_header_click_ignored_for_unsortable_column() {
    let mut grid = make_grid(outage_board());
    // "Started" is not sortable; neither is a column that does not exist.
    assert_eq!(grid.click_header(4), None);
    assert_eq!(grid.click_header(99), None);
    assert_eq!(grid.state().sort, None);
}

#[test]
fn test_sort_applies_to_filtered_rows() {
    let mut grid = make_grid(outage_board());
    grid.update_filters(FilterSet::new().with("status", FilterValue::equals("SCHEDULED")));
    grid.set_sort(0, Direction::Desc).unwrap();
    assert_eq!(visible_ids(&grid), vec![23, 22, 21, 20, 19]);
}

// =============================================================================
// Pagination
// =============================================================================

#[test]
fn test_pages_partition_the_collection() {
    let mut grid = make_grid(outage_board());
    assert_eq!(grid.state().total_pages, 3);

    let mut seen = Vec::new();
    for page in 1..=3 {
        assert!(grid.go_to_page(page));
        seen.extend(visible_ids(&grid));
    }
    let expected: Vec<i64> = (1..=23).collect();
    assert_eq!(seen, expected);
}

#[test]
fn test_final_page_is_short() {
    let mut grid = make_grid(outage_board());
    assert!(grid.go_to_page(3));
    assert_eq!(grid.page_rows(), 3);
    assert_eq!(visible_ids(&grid), vec![21, 22, 23]);
}

#[test]
fn test_out_of_range_pages_are_ignored() {
    let mut grid = make_grid(outage_board());
    assert!(grid.go_to_page(2));
    let before = grid.surface().output();

    assert!(!grid.go_to_page(0));
    assert!(!grid.go_to_page(4));
    assert_eq!(grid.state().current_page, 2);
    assert_eq!(grid.surface().output(), before);
}

#[test]
fn test_prev_next_step_within_bounds() {
    let mut grid = make_grid(outage_board());
    assert!(!grid.previous_page());
    assert!(grid.next_page());
    assert!(grid.next_page());
    assert_eq!(grid.state().current_page, 3);
    assert!(!grid.next_page());
    assert!(grid.previous_page());
    assert_eq!(grid.state().current_page, 2);
}

#[test]
fn test_page_size_larger_than_collection() {
    let mut grid = make_grid(outage_board());
    grid.set_page_size(50).unwrap();
    assert_eq!(grid.state().total_pages, 1);
    assert_eq!(grid.page_rows(), 23);
    assert!(grid.surface().pagination().contains("1-23 of 23"));
}

#[test]
fn test_filter_narrows_board_to_single_full_page() {
    let mut grid = make_grid(outage_board());
    grid.update_filters(FilterSet::new().with("status", FilterValue::equals("ONGOING")));

    assert_eq!(grid.state().matching, 10);
    assert_eq!(grid.state().total_pages, 1);
    let expected: Vec<i64> = (1..=10).collect();
    assert_eq!(visible_ids(&grid), expected);
    assert_eq!(grid.surface().pagination(), "-prev-  [1]  -next-  1-10 of 10");
    assert!(!grid.previous_page());
    assert!(!grid.next_page());
}

#[test]
fn test_page_size_change_snaps_to_page_one() {
    let mut grid = make_grid(outage_board());
    assert!(grid.go_to_page(3));
    grid.set_page_size(5).unwrap();
    assert_eq!(grid.state().current_page, 1);
    assert_eq!(grid.state().total_pages, 5);
    assert_eq!(visible_ids(&grid), vec![1, 2, 3, 4, 5]);
}

// =============================================================================
// Cell content
// =============================================================================

#[test]
fn test_computed_column_blank_when_getter_yields_nothing() {
    let columns = vec![
        Column::field("id", "ID"),
        Column::computed("Load", |record| {
            let affected = record.get_int("affected").ok().flatten()?;
            Some(Value::Int(affected / 10))
        }),
    ];
    let data = vec![
        Record::new().set("id", 1i64).set("affected", 120i64),
        Record::new().set("id", 2i64),
    ];
    let mut grid = Grid::new(GridOptions::new(columns).data(data), TextSurface::new()).unwrap();
    grid.render();

    let body = grid.surface().body();
    let lines: Vec<&str> = body.lines().collect();
    assert!(lines[0].contains("12"));
    // The second record has no affected count, so the computed cell is blank.
    assert_eq!(lines[1].trim_end(), "2");
}

#[test]
fn test_renderer_takes_precedence_over_formatter() {
    let columns = vec![
        Column::field("status", "Status")
            .renderer(|record| {
                let status = record.get_string("status").ok().flatten().unwrap_or_default();
                poweralert_grid::CellView::text(format!("<{status}>")).class("badge")
            })
            .formatter(|_, _| "IGNORED".to_string()),
    ];
    let data = vec![Record::new().set("status", "ONGOING")];
    let mut grid = Grid::new(GridOptions::new(columns).data(data), TextSurface::new()).unwrap();
    grid.render();
    assert!(grid.surface().body().contains("<ONGOING>"));
    assert!(!grid.surface().body().contains("IGNORED"));
}

#[test]
fn test_formatter_sees_present_values_only() {
    let columns = vec![
        Column::field("id", "ID"),
        Column::field("affected", "Affected").formatter(|value, _| match value.as_f64() {
            Some(n) => format!("{n} households"),
            None => "?".to_string(),
        }),
    ];
    let data = vec![
        Record::new().set("id", 1i64).set("affected", 120i64),
        Record::new().set("id", 2i64).set("affected", Value::Null),
    ];
    let mut grid = Grid::new(GridOptions::new(columns).data(data), TextSurface::new()).unwrap();
    grid.render();

    let lines: Vec<String> = grid.surface().body().lines().map(String::from).collect();
    assert!(lines[0].contains("120 households"));
    // Nulls never reach the formatter; the default blanks them.
    assert!(!lines[1].contains('?'));
}

#[test]
fn test_default_display_rules() {
    let columns = vec![
        Column::field("notified", "Notified"),
        Column::field("started", "Started"),
    ];
    let started = Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap();
    let data = vec![
        Record::new().set("notified", true).set("started", started),
    ];
    let mut grid = Grid::new(GridOptions::new(columns).data(data), TextSurface::new()).unwrap();
    grid.render();
    let body = grid.surface().body();
    assert!(body.contains("Yes"));
    assert!(body.contains("2026-03-14 09:30"));
}

// =============================================================================
// Empty, error, and reload states
// =============================================================================

#[test]
fn test_empty_collection_shows_placeholder_and_hides_pagination() {
    let mut grid = Grid::new(
        GridOptions::new(board_columns()).empty_state(|| "No outages reported".to_string()),
        TextSurface::new(),
    )
    .unwrap();
    grid.render();

    assert_eq!(grid.surface().body(), "No outages reported");
    assert_eq!(grid.surface().pagination(), "");
    assert_eq!(grid.state().total_pages, 1);
}

#[test]
fn test_error_state_masks_rows_until_reload() {
    let mut grid = make_grid(outage_board());
    grid.show_error("backend error 500: upstream timeout");

    assert_eq!(grid.surface().body(), "backend error 500: upstream timeout");
    assert_eq!(grid.surface().pagination(), "");
    assert_eq!(grid.page_rows(), 0);
    assert_eq!(grid.record_at(0), None);
    assert!(!grid.click_row(0));
    // The header survives; only rows and pagination are masked.
    assert!(grid.surface().header().contains("Area"));

    // A successful reload clears the error.
    grid.update_data(outage_board());
    assert_eq!(grid.page_rows(), 10);
    assert!(grid.surface().pagination().contains("1-10 of 23"));
}

#[test]
fn test_error_state_callback_overrides_message() {
    let mut grid = Grid::new(
        GridOptions::new(board_columns())
            .data(outage_board())
            .error_state(|| "Something went wrong. Try reloading.".to_string()),
        TextSurface::new(),
    )
    .unwrap();
    grid.render();
    grid.show_error("backend error 500: boom");
    assert_eq!(grid.surface().body(), "Something went wrong. Try reloading.");
}

#[test]
fn test_update_data_resets_to_first_page() {
    let mut grid = make_grid(outage_board());
    assert!(grid.go_to_page(3));
    grid.update_data(outage_board()[..7].to_vec());
    assert_eq!(grid.state().current_page, 1);
    assert_eq!(grid.state().records, 7);
    assert_eq!(grid.state().total_pages, 1);
}

// =============================================================================
// Row activation
// =============================================================================

#[test]
fn test_click_row_fires_with_the_visible_record() {
    let clicked = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&clicked);
    let mut grid = Grid::new(
        GridOptions::new(board_columns())
            .data(outage_board())
            .sort(0, Direction::Desc)
            .on_row_click(move |record| {
                sink.lock()
                    .unwrap()
                    .push(record.get_int("id").unwrap().unwrap());
            }),
        TextSurface::new(),
    )
    .unwrap();
    grid.render();

    // Descending by id, so the top row of page 1 is id 23.
    assert!(grid.click_row(0));
    assert!(grid.go_to_page(2));
    assert!(grid.click_row(1));
    assert_eq!(*clicked.lock().unwrap(), vec![23, 12]);
}

#[test]
fn test_click_row_ignores_rows_off_the_page() {
    let clicked = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&clicked);
    let mut grid = Grid::new(
        GridOptions::new(board_columns())
            .data(outage_board())
            .on_row_click(move |record| {
                sink.lock()
                    .unwrap()
                    .push(record.get_int("id").unwrap().unwrap());
            }),
        TextSurface::new(),
    )
    .unwrap();
    grid.render();
    assert!(grid.go_to_page(3));

    assert!(grid.click_row(2));
    assert!(!grid.click_row(3));
    assert_eq!(*clicked.lock().unwrap(), vec![23]);
}

#[test]
fn test_click_row_without_handler_reports_false() {
    let mut grid = make_grid(outage_board());
    assert!(!grid.click_row(0));
}

// =============================================================================
// Configuration errors
// =============================================================================

#[test]
fn test_grid_requires_columns() {
    let result = Grid::new(GridOptions::new(Vec::new()), TextSurface::new());
    assert_eq!(result.err(), Some(GridError::NoColumns));
}

#[test]
fn test_grid_rejects_zero_page_size() {
    let result = Grid::new(
        GridOptions::new(board_columns()).page_size(0),
        TextSurface::new(),
    );
    assert_eq!(result.err(), Some(GridError::InvalidPageSize { given: 0 }));

    let mut grid = make_grid(outage_board());
    assert!(grid.set_page_size(0).is_err());
    // The failed call must leave the pager untouched.
    assert_eq!(grid.state().page_size, 10);
}

#[test]
fn test_grid_rejects_sort_on_unknown_column() {
    let result = Grid::new(
        GridOptions::new(board_columns()).sort(9, Direction::Asc),
        TextSurface::new(),
    );
    assert_eq!(
        result.err(),
        Some(GridError::ColumnOutOfRange { index: 9, count: 5 })
    );

    let mut grid = make_grid(outage_board());
    assert!(grid.set_sort(9, Direction::Asc).is_err());
    assert_eq!(grid.state().sort, None);
}

// =============================================================================
// Rendering contract
// =============================================================================

#[test]
fn test_render_is_idempotent() {
    let mut grid = make_grid(outage_board());
    grid.set_sort(2, Direction::Asc).unwrap();
    assert!(grid.go_to_page(2));
    let first = grid.surface().output();

    grid.render();
    // A full render resolves the same state to the same output.
    assert_eq!(grid.surface().output(), first);
}

#[test]
fn test_state_snapshot_reflects_engine() {
    let mut grid = make_grid(outage_board());
    grid.update_filters(FilterSet::new().with("status", FilterValue::equals("ONGOING")));
    grid.set_page_size(4).unwrap();
    grid.set_sort(0, Direction::Desc).unwrap();
    assert!(grid.go_to_page(2));

    let state = grid.state();
    assert_eq!(state.records, 23);
    assert_eq!(state.matching, 10);
    assert_eq!(state.current_page, 2);
    assert_eq!(state.page_size, 4);
    assert_eq!(state.total_pages, 3);
    assert_eq!(state.sort.map(|s| (s.column, s.direction)), Some((0, Direction::Desc)));
}
