pub mod message_card;
pub mod now_playing;
pub mod skeleton;
pub mod track_card;

pub use message_card::MessageCard;
pub use now_playing::NowPlaying;
pub use skeleton::Skeleton;
pub use track_card::track_card;
