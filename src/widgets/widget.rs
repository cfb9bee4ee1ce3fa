use crossterm::event::KeyEvent;
use ratatui::layout::Rect;
use ratatui::Frame;

/// Render context for [`Component`]
pub struct ComponentRenderCtx {
	pub area: Rect,
	pub selected: bool,
}

pub trait Component {
	/// Send inputs to the component; true means the key was consumed
	fn input(&mut self, key: &KeyEvent) -> bool;
	/// Render the component
	fn render(&self, frame: &mut Frame, ctx: &mut ComponentRenderCtx);
	/// Widget height, for vertical layouts
	fn height(&self) -> u16;
}
