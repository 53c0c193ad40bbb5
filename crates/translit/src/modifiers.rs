bitflags::bitflags! {
	/// Modifier keys held while a character is fed to a [`crate::Filter`].
	///
	/// Bit positions follow the X11 modifier layout so masks coming from a
	/// toolkit can be passed through unchanged.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct ModifierType: u32 {
		const SHIFT = 1 << 0;
		const LOCK = 1 << 1;
		const CONTROL = 1 << 2;
		/// Usually Alt.
		const MOD1 = 1 << 3;
		const MOD2 = 1 << 4;
		const MOD3 = 1 << 5;
		const MOD4 = 1 << 6;
		const MOD5 = 1 << 7;
		const BUTTON1 = 1 << 8;
		const BUTTON2 = 1 << 9;
		const BUTTON3 = 1 << 10;
		const BUTTON4 = 1 << 11;
		const BUTTON5 = 1 << 12;
		// Bits 13-25 belong to XKB and are left undefined.
		const SUPER = 1 << 26;
		const HYPER = 1 << 27;
		const META = 1 << 28;
		/// Set on key release events.
		const RELEASE = 1 << 30;

		const MODIFIER_MASK = 0x5c00_1fff;
	}
}

impl ModifierType {
	/// Modifiers that usually turn a keystroke into a shortcut rather than text.
	pub const SHORTCUT: Self = Self::CONTROL
		.union(Self::MOD1)
		.union(Self::SUPER)
		.union(Self::HYPER)
		.union(Self::META);

	/// Returns true for key release events.
	pub const fn is_release(self) -> bool {
		self.contains(Self::RELEASE)
	}

	/// Returns true when a shortcut modifier is held.
	pub const fn is_shortcut(self) -> bool {
		self.intersects(Self::SHORTCUT)
	}
}
