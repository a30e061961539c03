//! Copies world snapshots into the rendering scene.

use topdown_shooter_rendering::{
    BulletPresentation, Camera, Color, EnemyPresentation, PlayerPresentation, Scene, SceneWall,
};
use topdown_shooter_world::{query, World};

/// Builds the first scene, including the static wall list.
pub(crate) fn initial_scene(world: &World, camera: Camera) -> Scene {
    let walls = query::level(world)
        .walls()
        .iter()
        .map(|wall| SceneWall::new(wall.bounds(), Color::from(wall.color())))
        .collect();
    let player = query::player(world);

    let mut scene = Scene::new(
        camera,
        walls,
        PlayerPresentation::new(player.position, player.heading),
        Vec::new(),
        Vec::new(),
    );
    populate_scene(world, &mut scene);
    scene
}

/// Refreshes the dynamic parts of the scene and re-centres the camera on the player.
///
/// Walls never change after the level is built and are left untouched.
pub(crate) fn populate_scene(world: &World, scene: &mut Scene) {
    let player = query::player(world);
    scene.camera.follow(player.position);
    scene.player = PlayerPresentation::new(player.position, player.heading);

    scene.enemies.clear();
    scene.enemies.extend(
        query::enemy_view(world)
            .living()
            .map(|enemy| EnemyPresentation::new(enemy.position)),
    );

    scene.bullets.clear();
    scene.bullets.extend(
        query::bullet_view(world)
            .iter()
            .map(|bullet| BulletPresentation::new(bullet.position)),
    );
}
