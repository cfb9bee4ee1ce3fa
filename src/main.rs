use std::path::PathBuf;
use std::time::Duration;

use chrono::Local;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use crossterm::event::Event;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use crossterm::event::{self};
use ratatui::layout::Constraint;
use ratatui::layout::Layout;
use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::style::Stylize;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::DefaultTerminal;
use ratatui::Frame;

use dayk::data::model::Document;
use dayk::data::store;
use dayk::data::store::StoreError;
use dayk::logging;
use dayk::style::HELP_LINE_BG;
use dayk::ui::agenda::AgendaPanel;
use dayk::ui::goals::GoalsPanel;
use dayk::ui::notes::NotesPanel;
use dayk::ui::reflection::ReflectionPanel;
use dayk::ui::toast::Severity;
use dayk::ui::ImportPrompt;
use dayk::ui::Session;
use dayk::widgets::confirm::Confirm;
use dayk::widgets::form::FormExt;
use dayk::widgets::form::FormSignal;
use dayk::widgets::widget::Component;
use dayk::widgets::widget::ComponentRenderCtx;

const TICK: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Panel {
	Agenda,
	Notes,
	Goals,
	Reflection,
}

impl Panel {
	const ALL: [Panel; 4] = [Panel::Agenda, Panel::Notes, Panel::Goals, Panel::Reflection];

	fn title(self) -> &'static str {
		match self {
			Panel::Agenda => "Agenda",
			Panel::Notes => "Notes",
			Panel::Goals => "Goals",
			Panel::Reflection => "Reflection",
		}
	}

	fn next(self) -> Panel {
		Panel::ALL[(self as usize + 1) % Panel::ALL.len()]
	}

	fn prev(self) -> Panel {
		Panel::ALL[(self as usize + Panel::ALL.len() - 1) % Panel::ALL.len()]
	}
}

enum Flow {
	Continue,
	Quit,
}

struct App {
	session: Session,
	active: Panel,

	agenda: AgendaPanel,
	notes: NotesPanel,
	goals: GoalsPanel,
	reflection: ReflectionPanel,

	import_prompt: Option<ImportPrompt>,
	import_confirm: Option<(Confirm<'static>, Document)>,
}

impl App {
	fn new(session: Session) -> Self {
		let reflection = ReflectionPanel::new(&session);
		Self {
			session,
			active: Panel::Agenda,
			agenda: AgendaPanel::new(),
			notes: NotesPanel::new(),
			goals: GoalsPanel::new(),
			reflection,
			import_prompt: None,
			import_confirm: None,
		}
	}

	fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
		loop {
			self.session.toasts.prune();
			terminal.draw(|frame| self.draw(frame))?;

			if !event::poll(TICK)? {
				continue;
			}
			let Event::Key(key) = event::read()? else {
				continue;
			};
			if key.kind != KeyEventKind::Press {
				continue;
			}
			if let Flow::Quit = self.handle_key(&key) {
				return Ok(());
			}
		}
	}

	/// Closes every open form, dropping their transient input.
	fn close_all_forms(&mut self) {
		self.agenda.close_forms();
		self.notes.close_forms();
		self.goals.close_forms();
		self.import_prompt = None;
		self.import_confirm = None;
	}

	fn apply_import(&mut self, doc: Document) {
		self.session.planner.replace_document(doc);
		self.session.persist();
		self.reflection.reload(&self.session);
		self.session.notify("Data imported", Severity::Success);
	}

	fn handle_key(&mut self, key: &KeyEvent) -> Flow {
		// Global shortcuts first, so forms never swallow them. Unbound
		// ctrl keys fall through for the text inputs (^b/^f/^u).
		if key.modifiers.contains(KeyModifiers::CONTROL) {
			match key.code {
				KeyCode::Char('c') | KeyCode::Char('q') => return Flow::Quit,
				KeyCode::Char('s') => {
					self.reflection.submit(&mut self.session);
					return Flow::Continue;
				}
				KeyCode::Char('n') => {
					self.active = Panel::Notes;
					self.notes.open_form();
					return Flow::Continue;
				}
				KeyCode::Char('a') => {
					self.active = Panel::Agenda;
					self.agenda.open_form();
					return Flow::Continue;
				}
				KeyCode::Char('g') => {
					self.active = Panel::Goals;
					self.goals.open_form();
					return Flow::Continue;
				}
				KeyCode::Char('e') => {
					self.session.export();
					return Flow::Continue;
				}
				KeyCode::Char('o') => {
					if self.import_prompt.is_none() && self.import_confirm.is_none() {
						self.import_prompt = Some(ImportPrompt::new());
					}
					return Flow::Continue;
				}
				KeyCode::Char('d') => {
					self.session.toasts.dismiss_oldest();
					return Flow::Continue;
				}
				_ => {}
			}
		}

		if key.code == KeyCode::Esc {
			self.close_all_forms();
			return Flow::Continue;
		}

		// Import runs through two modal steps: path prompt, then confirmation
		if let Some((mut confirm, doc)) = self.import_confirm.take() {
			confirm.input(key);
			match confirm.decision() {
				Some(true) => self.apply_import(doc),
				Some(false) => {}
				None => self.import_confirm = Some((confirm, doc)),
			}
			return Flow::Continue;
		}
		if let Some(mut prompt) = self.import_prompt.take() {
			match prompt.input_form(key) {
				Some(FormSignal::Submit) => {
					let path = PathBuf::from(prompt.value().trim());
					match store::import_document(&path) {
						Ok(doc) => {
							self.import_confirm = Some((
								Confirm::new(
									"Import",
									"Importing replaces all current data. Continue?",
								),
								doc,
							));
						}
						Err(err) => {
							log::warn!("{err}");
							let message = match err {
								StoreError::Parse { .. } => "That file is not a valid backup",
								_ => "Could not read that file",
							};
							self.session.notify(message, Severity::Error);
							// Leave the prompt open so the path can be fixed
							self.import_prompt = Some(prompt);
						}
					}
				}
				Some(FormSignal::Exit) => {}
				None => self.import_prompt = Some(prompt),
			}
			return Flow::Continue;
		}

		let handled = match self.active {
			Panel::Agenda => self.agenda.input(key, &mut self.session),
			Panel::Notes => self.notes.input(key, &mut self.session),
			Panel::Goals => self.goals.input(key, &mut self.session),
			Panel::Reflection => self.reflection.input(key, &mut self.session),
		};
		if handled {
			return Flow::Continue;
		}

		match key.code {
			KeyCode::Tab => self.active = self.active.next(),
			KeyCode::BackTab => self.active = self.active.prev(),
			KeyCode::Char('1') => self.active = Panel::Agenda,
			KeyCode::Char('2') => self.active = Panel::Notes,
			KeyCode::Char('3') => self.active = Panel::Goals,
			KeyCode::Char('4') => self.active = Panel::Reflection,
			KeyCode::Char('q') => return Flow::Quit,
			_ => {}
		}
		Flow::Continue
	}

	fn draw(&self, frame: &mut Frame) {
		let [header_area, tabs_area, content_area, help_area] = Layout::vertical([
			Constraint::Length(1),
			Constraint::Length(1),
			Constraint::Min(0),
			Constraint::Length(1),
		])
		.areas(frame.area());

		// Header: app name left, clock right
		frame.render_widget(
			Line::from(" dayk ".bold().fg(Color::Red)),
			header_area,
		);
		frame.render_widget(
			Line::from(format!("{} ", Local::now().format("%a %d %b %Y · %H:%M:%S")))
				.fg(Color::White)
				.right_aligned(),
			header_area,
		);

		// Tab bar
		let mut tabs = vec![];
		for (idx, panel) in Panel::ALL.iter().enumerate() {
			let label = format!(" {} {} ", idx + 1, panel.title());
			if *panel == self.active {
				tabs.push(Span::styled(
					label,
					Style::default().fg(Color::Black).bg(Color::Cyan).bold(),
				));
			} else {
				tabs.push(Span::styled(label, Style::default().fg(Color::Gray)));
			}
			tabs.push(Span::raw(" "));
		}
		frame.render_widget(Line::from(tabs), tabs_area);

		match self.active {
			Panel::Agenda => self.agenda.render(frame, content_area, &self.session),
			Panel::Notes => self.notes.render(frame, content_area, &self.session),
			Panel::Goals => self.goals.render(frame, content_area, &self.session),
			Panel::Reflection => self.reflection.render(frame, content_area, &self.session),
		}

		// Import modals sit above the panel
		if let Some(prompt) = &self.import_prompt {
			let mut ctx = ComponentRenderCtx {
				area: content_area,
				selected: true,
			};
			prompt.render_form(frame, &mut ctx);
		}
		if let Some((confirm, _)) = &self.import_confirm {
			let mut ctx = ComponentRenderCtx {
				area: content_area,
				selected: true,
			};
			confirm.render(frame, &mut ctx);
		}

		frame.render_widget(self.help_line(), help_area);

		self.session.toasts.render(frame);
	}

	fn help_line(&self) -> Line<'static> {
		fn hint(key: &'static str, action: &'static str) -> [Span<'static>; 2] {
			[
				Span::from(key).bold().fg(Color::Green),
				Span::from(action).fg(Color::White),
			]
		}

		let mut spans: Vec<Span> = vec![" ".into()];
		let panel_hints: &[[Span; 2]] = &match self.active {
			Panel::Agenda => [
				hint("⮁", " (navigate) "),
				hint("space", " (toggle) "),
				hint("a", " (add) "),
				hint("d", " (delete) "),
			],
			Panel::Notes => [
				hint("⮁", " (navigate) "),
				hint("e", " (edit) "),
				hint("a", " (add) "),
				hint("d", " (delete) "),
			],
			Panel::Goals => [
				hint("⮁", " (navigate) "),
				hint("p", " (progress) "),
				hint("a", " (add) "),
				hint("d", " (delete) "),
			],
			Panel::Reflection => [
				hint("⮁", " (fields) "),
				hint("^s", " (save) "),
				hint("enter", " (save) "),
				hint("esc", " (clear forms) "),
			],
		};
		for pair in panel_hints {
			spans.extend(pair.iter().cloned());
		}
		for pair in [
			hint("tab", " (panels) "),
			hint("^e", " (export) "),
			hint("^o", " (import) "),
			hint("q", " (quit) "),
		] {
			spans.extend(pair);
		}
		Line::from(spans).bg(HELP_LINE_BG)
	}
}

fn default_document_path() -> PathBuf {
	PathBuf::from("dayk.json")
}

fn default_log_dir() -> PathBuf {
	std::env::temp_dir().join("dayk")
}

fn main() -> Result<()> {
	color_eyre::install()?;

	let args: Vec<String> = std::env::args().collect();
	let mut opts = getopts::Options::new();
	opts.optopt("f", "file", "planner document path (default: dayk.json)", "PATH");
	opts.optopt("", "log-dir", "log directory", "DIR");
	opts.optflag("h", "help", "print this help");
	let matches = opts.parse(&args[1..])?;
	if matches.opt_present("h") {
		print!("{}", opts.usage("Usage: dayk [options]"));
		return Ok(());
	}

	let path = matches
		.opt_str("f")
		.map(PathBuf::from)
		.unwrap_or_else(default_document_path);
	let log_dir = matches
		.opt_str("log-dir")
		.map(PathBuf::from)
		.unwrap_or_else(default_log_dir);

	let _logger = logging::init(&log_dir).map_err(|err| eyre!(err))?;
	log::info!("starting with document '{}'", path.display());

	let session = Session::open(path);
	let terminal = ratatui::init();
	let app_result = App::new(session).run(terminal);
	ratatui::restore();
	app_result
}
