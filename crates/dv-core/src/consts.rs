//! Core game constants
//!
//! Map geometry, depth bounds, and the fixed numbers of the turn model.
//! Tunable balance values live in [`crate::data::BalanceConfig`].

/// Map dimensions
pub const COLNO: usize = 80;
pub const ROWNO: usize = 43;

/// Dungeon depth bounds (inclusive)
pub const MIN_DEPTH: u8 = 1;
pub const MAX_DEPTH: u8 = 26;

/// Movement speed constants
pub const NORMAL_SPEED: i32 = 12;
pub const FAST_SPEED: i32 = 18;
pub const SLOW_SPEED: i32 = 6;

/// Energy an entity must hold before it may act
pub const ACTION_THRESHOLD: i32 = NORMAL_SPEED;

/// Room generation limits
pub const MAX_ROOMS: usize = 30;
pub const ROOM_MIN_SIZE: usize = 6;
pub const ROOM_MAX_SIZE: usize = 10;
pub const MIN_ROOMS: usize = 2;

/// Padding kept between rooms during rejection sampling
pub const ROOM_PADDING: usize = 1;

/// Generation retry bounds
pub const MAX_GENERATION_ATTEMPTS: u32 = 16;
pub const MAX_CONNECT_PASSES: u32 = 8;

/// Default sight radius of the player
pub const TORCH_RADIUS: i32 = 10;

/// Inventory letters available to the player
pub const INVENTORY_LETTERS: &str = "abcdefghijklmnopqrstuvwxyz";

/// Maximum lines retained in the message log
pub const MAX_MESSAGES: usize = 200;

/// Enchant scrolls stop working at this bonus
pub const MAX_ENCHANTMENT: i32 = 3;

/// Map symbols
pub const S_FLOOR: char = '.';
pub const S_WALL: char = '#';
pub const S_OPEN_DOOR: char = '\'';
pub const S_CLOSED_DOOR: char = '+';
pub const S_UPSTAIR: char = '<';
pub const S_DOWNSTAIR: char = '>';
pub const S_TRAP: char = '^';
pub const S_GOAL: char = '*';

/// Item symbols
pub const GOLD_SYM: char = '$';
pub const WEAPON_SYM: char = ')';
pub const ARMOR_SYM: char = '[';
pub const SHIELD_SYM: char = ']';
pub const RING_SYM: char = '=';
pub const FOOD_SYM: char = '%';
pub const POTION_SYM: char = '!';
pub const SCROLL_SYM: char = '?';
pub const WAND_SYM: char = '/';
