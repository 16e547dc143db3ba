/// A derived value that is recomputed only when read after being invalidated.
///
/// The cell is empty while dirty, so a present value is always the result of
/// the most recent computation. Reading goes through [`Cached::resolve`], an
/// explicit `&mut` call, which keeps recomputation visible at the call site.
#[derive(Clone, Debug, PartialEq)]
pub struct Cached<T: Copy> {
	label: &'static str,
	value: Option<T>,
	evaluations: u64,
}

impl<T: Copy> Cached<T> {
	/// Creates a dirty cell; the first read computes the value.
	pub fn new(label: &'static str) -> Self {
		Self {
			label,
			value: None,
			evaluations: 0,
		}
	}

	pub fn invalidate(&mut self) {
		self.value = None;
	}

	pub fn is_dirty(&self) -> bool {
		self.value.is_none()
	}

	/// The cached value, without computing it.
	pub fn peek(&self) -> Option<T> {
		self.value
	}

	/// How many times the value has been computed.
	pub fn evaluations(&self) -> u64 {
		self.evaluations
	}

	pub fn resolve(&mut self, compute: impl FnOnce() -> T) -> T {
		if let Some(value) = self.value {
			return value;
		}

		log::trace!("recomputing {} matrix", self.label);
		let value = compute();
		self.store(value)
	}

	/// Like [`Cached::resolve`], but a failed computation leaves the cell dirty.
	pub fn try_resolve<E>(&mut self, compute: impl FnOnce() -> Result<T, E>) -> Result<T, E> {
		if let Some(value) = self.value {
			return Ok(value);
		}

		log::trace!("recomputing {} matrix", self.label);
		let value = compute()?;
		Ok(self.store(value))
	}

	fn store(&mut self, value: T) -> T {
		self.value = Some(value);
		self.evaluations += 1;
		value
	}
}
