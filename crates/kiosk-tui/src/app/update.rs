use chrono::Local;

use kiosk_core::prefs::save_device_class;
use kiosk_core::{Dismissal, GalleryEvent, KeySignal, LoadState};

use super::{App, Hit};
use crate::action::Action;
use crate::model::calendar::CalendarState;
use crate::model::grid::row_lens;

impl App {
    /// Process a user action and update state. Returns true if the app should quit.
    pub fn update(&mut self, action: Action) -> bool {
        match action {
            Action::ForceQuit => {
                self.should_quit = true;
                return true;
            }
            Action::Tick => {
                self.tick = self.tick.wrapping_add(1);
                self.today = Local::now().date_naive();
                return false;
            }
            Action::Resize(w, _h) => {
                self.width = w;
                return false;
            }
            _ => {}
        }

        // Quit confirmation modal: q confirms, Esc cancels
        if self.confirm_quit {
            match action {
                Action::Quit => {
                    self.should_quit = true;
                    return true;
                }
                Action::Back => self.confirm_quit = false,
                _ => {}
            }
            return false;
        }

        if self.show_help {
            match action {
                Action::ToggleHelp | Action::Back => self.show_help = false,
                Action::Quit => self.confirm_quit = true,
                _ => {}
            }
            return false;
        }

        if self.calendar.open {
            self.update_calendar(action);
        } else if self.gallery.viewer().is_open() {
            self.update_viewer(action);
        } else if self.gallery.comparison().is_open() {
            self.update_versus(action);
        } else {
            self.update_gallery(action);
        }
        false
    }

    fn update_calendar(&mut self, action: Action) {
        let today = self.today;
        match action {
            Action::MoveLeft => self.calendar.move_by(-1, today),
            Action::MoveRight => self.calendar.move_by(1, today),
            Action::MoveUp => self.calendar.move_by(-7, today),
            Action::MoveDown => self.calendar.move_by(7, today),
            Action::PrevMonth => self.calendar.shift_month(-1, today),
            Action::NextMonth => self.calendar.shift_month(1, today),
            Action::Select => {
                let day = self.calendar.cursor;
                self.pick_day(day);
            }
            Action::Back | Action::OpenCalendar => self.calendar.close(),
            Action::Quit => self.confirm_quit = true,
            Action::ClickAt(x, y) => match self.hit_at(x, y).cloned() {
                Some(Hit::Day(day)) => self.pick_day(day),
                _ if self.outside_popup(x, y) => self.calendar.close(),
                _ => {}
            },
            _ => {}
        }
    }

    fn pick_day(&mut self, day: chrono::NaiveDate) {
        if !CalendarState::is_selectable(day, self.today) {
            return;
        }
        self.calendar.close();
        self.dispatch(GalleryEvent::SetDay(day));
    }

    fn update_viewer(&mut self, action: Action) {
        match action {
            Action::MoveLeft | Action::MoveUp => {
                self.dispatch(GalleryEvent::Key(KeySignal::MoveLeft))
            }
            Action::MoveRight | Action::MoveDown => {
                self.dispatch(GalleryEvent::Key(KeySignal::MoveRight))
            }
            Action::Back => self.dispatch(GalleryEvent::Key(KeySignal::Dismiss)),
            Action::Close => self.dispatch(GalleryEvent::Dismiss(Dismissal::CloseButton)),
            Action::Quit => self.confirm_quit = true,
            Action::ToggleHelp => self.show_help = true,
            Action::ClickAt(x, y) => match self.hit_at(x, y).cloned() {
                Some(Hit::CloseViewer) => {
                    self.dispatch(GalleryEvent::Dismiss(Dismissal::CloseButton))
                }
                _ if self.outside_popup(x, y) => {
                    self.dispatch(GalleryEvent::Dismiss(Dismissal::Backdrop))
                }
                _ => {}
            },
            _ => {}
        }
    }

    fn update_versus(&mut self, action: Action) {
        let side = self.gallery.comparison().active_side();
        match action {
            Action::Back | Action::ToggleVersus => self.dispatch(GalleryEvent::CloseComparison),
            Action::ToggleControls => self.dispatch(GalleryEvent::ToggleComparisonControls),
            Action::SwitchSide => self.dispatch(GalleryEvent::SetActiveSide(side.other())),
            Action::PrevSite => self.dispatch(GalleryEvent::CycleSite { side, delta: -1 }),
            Action::NextSite => self.dispatch(GalleryEvent::CycleSite { side, delta: 1 }),
            Action::MoveLeft | Action::MoveUp => {
                self.dispatch(GalleryEvent::StepRecord { side, delta: -1 })
            }
            Action::MoveRight | Action::MoveDown => {
                self.dispatch(GalleryEvent::StepRecord { side, delta: 1 })
            }
            Action::Quit => self.confirm_quit = true,
            Action::ToggleHelp => self.show_help = true,
            Action::ClickAt(x, y) => match self.hit_at(x, y).cloned() {
                Some(Hit::SideTab(side)) => self.dispatch(GalleryEvent::SetActiveSide(side)),
                Some(Hit::Site { side, source }) => {
                    self.dispatch(GalleryEvent::SelectSite { side, source })
                }
                Some(Hit::Record { side, id }) => {
                    if let Some(record) = self.gallery.timeline().find(id).cloned() {
                        self.dispatch(GalleryEvent::SelectRecord { side, record });
                    }
                }
                _ => {}
            },
            _ => {}
        }
    }

    fn update_gallery(&mut self, action: Action) {
        let rows = row_lens(&self.gallery);
        match action {
            Action::Quit => self.confirm_quit = true,
            Action::ToggleHelp => self.show_help = true,
            Action::MoveUp => self.grid.move_up(&rows),
            Action::MoveDown => self.grid.move_down(&rows),
            Action::MoveLeft => self.grid.move_left(&rows),
            Action::MoveRight => self.grid.move_right(&rows),
            Action::Select => {
                if let Some(record) = self.grid.selected(&self.gallery).cloned() {
                    self.dispatch(GalleryEvent::Focus(record));
                }
            }
            Action::ToggleDevice => self.toggle_device(),
            Action::OpenCalendar => self.open_calendar(),
            Action::ToggleVersus => self.open_versus(),
            Action::ToggleSourcesBar => self.show_sources = !self.show_sources,
            Action::ToggleSource(n) => {
                let source = self.gallery.timeline().sources().nth(n).map(str::to_string);
                if let Some(source) = source {
                    self.dispatch(GalleryEvent::ToggleSource(source));
                }
            }
            Action::Reload => self.dispatch(GalleryEvent::Reload),
            Action::ClickAt(x, y) => match self.hit_at(x, y).cloned() {
                Some(Hit::DeviceToggle) => self.toggle_device(),
                Some(Hit::DateButton) => self.open_calendar(),
                Some(Hit::VersusButton) => self.open_versus(),
                Some(Hit::SourcesToggle) => self.show_sources = !self.show_sources,
                Some(Hit::SourceChip(source)) => {
                    self.dispatch(GalleryEvent::ToggleSource(source))
                }
                Some(Hit::Cell(pos)) => {
                    self.grid = pos;
                    if let Some(record) = self.grid.selected(&self.gallery).cloned() {
                        self.dispatch(GalleryEvent::Focus(record));
                    }
                }
                _ => {}
            },
            _ => {}
        }
    }

    fn toggle_device(&mut self) {
        let device = self.gallery.device().toggled();
        save_device_class(self.prefs.as_ref(), device);
        self.dispatch(GalleryEvent::SetDevice(device));
    }

    fn open_calendar(&mut self) {
        self.calendar.open_at(self.gallery.day());
        self.request_active_days();
    }

    /// Versus mode is offered only once a non-empty day has loaded.
    pub fn versus_available(&self) -> bool {
        *self.gallery.load_state() == LoadState::Loaded && !self.gallery.timeline().is_empty()
    }

    fn open_versus(&mut self) {
        if self.versus_available() {
            self.dispatch(GalleryEvent::OpenComparison);
        }
    }

    fn outside_popup(&self, x: u16, y: u16) -> bool {
        self.last_popup_area
            .is_some_and(|area| !area.contains(ratatui::layout::Position::new(x, y)))
    }
}
