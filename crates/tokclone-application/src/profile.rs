//! Profile view model.

use rand::Rng;
use tokclone_core::user::User;

const GRID_SIZE: usize = 9;

/// One thumbnail of the profile's video grid.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileTile {
    pub thumbnail: String,
    /// Display label such as `"12.3k"`
    pub views: String,
}

/// Profile page of the signed-in user.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfilePage {
    pub user: User,
    pub tiles: Vec<ProfileTile>,
}

impl ProfilePage {
    /// Builds the page. View counts are random and fixed for this mount.
    pub fn generate(user: User, rng: &mut impl Rng) -> Self {
        let tiles = (1..=GRID_SIZE)
            .map(|n| ProfileTile {
                thumbnail: format!("https://picsum.photos/300/400?random={}", n + 10),
                views: format!("{:.1}k", rng.gen_range(0.0..50.0)),
            })
            .collect();
        Self { user, tiles }
    }
}
