//! # BSP Tree
//!
//! Binary Space Partitioning tree for CSG boolean operations.
//! Based on the csg.js algorithm by Evan Wallace.
//!
//! ## Operations
//!
//! - `clip_to`: Remove polygons from this tree that are inside another tree
//! - `invert`: Flip all polygons and swap front/back subtrees
//! - `all_polygons`: Collect all polygons from the tree
//!
//! ## Stack Safety
//!
//! All operations use iterative algorithms with explicit stacks so deep
//! trees from dense meshes cannot overflow the call stack.

use crate::plane::Plane;
use crate::polygon::Polygon;

/// A node in the BSP tree.
///
/// Each node partitions space using a plane and stores polygons
/// coplanar with that plane.
#[derive(Debug, Clone)]
pub struct BspNode {
    /// Dividing plane, taken from the first polygon stored at this node
    plane: Option<Plane>,
    /// Polygons coplanar with this node's plane
    polygons: Vec<Polygon>,
    /// Front subtree (polygons in front of plane)
    front: Option<Box<BspNode>>,
    /// Back subtree (polygons behind plane)
    back: Option<Box<BspNode>>,
}

impl BspNode {
    fn empty() -> Self {
        Self {
            plane: None,
            polygons: Vec::new(),
            front: None,
            back: None,
        }
    }

    /// Creates a new BSP tree from polygons.
    ///
    /// Uses iterative construction with an explicit work stack.
    pub fn new(polygons: Vec<Polygon>) -> Self {
        let mut root = Self::empty();

        if polygons.is_empty() {
            return root;
        }

        // Each work item is (node_ptr, polygons_to_add). Raw pointers give
        // mutable access to nodes already linked into the tree.
        type WorkItem = (*mut BspNode, Vec<Polygon>);
        let mut stack: Vec<WorkItem> = vec![(&mut root as *mut BspNode, polygons)];

        while let Some((node_ptr, mut polys)) = stack.pop() {
            if polys.is_empty() {
                continue;
            }

            // Safety: we control all pointers and they point to valid nodes
            let node = unsafe { &mut *node_ptr };

            // First polygon's plane becomes this node's splitter
            let splitter = polys.swap_remove(0);
            let plane = *splitter.plane();
            node.plane = Some(plane);
            node.polygons.push(splitter);

            let estimated_size = polys.len() / 2 + 1;
            let mut front_polys = Vec::with_capacity(estimated_size);
            let mut back_polys = Vec::with_capacity(estimated_size);

            // Coplanar polygons stay at this node, the rest split down
            let mut coplanar_front = Vec::new();
            let mut coplanar_back = Vec::new();
            for poly in polys {
                poly.split(
                    &plane,
                    &mut coplanar_front,
                    &mut coplanar_back,
                    &mut front_polys,
                    &mut back_polys,
                );
            }
            node.polygons.extend(coplanar_front);
            node.polygons.extend(coplanar_back);

            if !front_polys.is_empty() {
                let front = node.front.get_or_insert_with(|| Box::new(Self::empty()));
                stack.push((front.as_mut() as *mut BspNode, front_polys));
            }

            if !back_polys.is_empty() {
                let back = node.back.get_or_insert_with(|| Box::new(Self::empty()));
                stack.push((back.as_mut() as *mut BspNode, back_polys));
            }
        }

        root
    }

    /// Inverts this BSP tree (flips all polygons and swaps subtrees).
    ///
    /// Converts the tree from representing a solid to representing its
    /// complement. Used by the difference operation.
    pub fn invert(&mut self) {
        let mut stack: Vec<*mut BspNode> = vec![self as *mut BspNode];

        while let Some(node_ptr) = stack.pop() {
            // Safety: we control all pointers and they point to valid nodes
            let node = unsafe { &mut *node_ptr };

            for poly in &mut node.polygons {
                poly.flip();
            }
            if let Some(ref mut plane) = node.plane {
                plane.flip();
            }

            std::mem::swap(&mut node.front, &mut node.back);

            if let Some(ref mut front) = node.front {
                stack.push(front.as_mut() as *mut BspNode);
            }
            if let Some(ref mut back) = node.back {
                stack.push(back.as_mut() as *mut BspNode);
            }
        }
    }

    /// Clips polygons to this BSP tree.
    ///
    /// Removes the parts of the input polygons that lie inside the solid
    /// represented by this tree and returns the surviving parts.
    pub fn clip_polygons(&self, polygons: Vec<Polygon>) -> Vec<Polygon> {
        let mut result = Vec::new();
        let mut stack: Vec<(&BspNode, Vec<Polygon>)> = vec![(self, polygons)];

        while let Some((node, polys)) = stack.pop() {
            if polys.is_empty() {
                continue;
            }

            let plane = match node.plane {
                Some(p) => p,
                None => {
                    result.extend(polys);
                    continue;
                }
            };

            let mut front_polys = Vec::new();
            let mut back_polys = Vec::new();

            // Coplanar polygons follow the side their normal faces
            let mut coplanar_front = Vec::new();
            let mut coplanar_back = Vec::new();
            for poly in polys {
                poly.split(
                    &plane,
                    &mut coplanar_front,
                    &mut coplanar_back,
                    &mut front_polys,
                    &mut back_polys,
                );
            }
            front_polys.extend(coplanar_front);
            back_polys.extend(coplanar_back);

            if let Some(ref front) = node.front {
                stack.push((front.as_ref(), front_polys));
            } else {
                result.extend(front_polys);
            }

            // No back subtree means back polygons are inside the solid
            if let Some(ref back) = node.back {
                stack.push((back.as_ref(), back_polys));
            }
        }

        result
    }

    /// Clips this tree's polygons to another tree.
    ///
    /// Removes parts of this tree's polygons that are inside the other tree.
    pub fn clip_to(&mut self, other: &BspNode) {
        let mut stack: Vec<*mut BspNode> = vec![self as *mut BspNode];

        while let Some(node_ptr) = stack.pop() {
            // Safety: we control all pointers and they point to valid nodes
            let node = unsafe { &mut *node_ptr };

            node.polygons = other.clip_polygons(std::mem::take(&mut node.polygons));

            if let Some(ref mut front) = node.front {
                stack.push(front.as_mut() as *mut BspNode);
            }
            if let Some(ref mut back) = node.back {
                stack.push(back.as_mut() as *mut BspNode);
            }
        }
    }

    /// Collects all polygons from this tree.
    pub fn all_polygons(&self) -> Vec<Polygon> {
        let mut result = Vec::new();
        let mut stack: Vec<&BspNode> = vec![self];

        while let Some(node) = stack.pop() {
            result.extend(node.polygons.iter().cloned());

            if let Some(ref front) = node.front {
                stack.push(front.as_ref());
            }
            if let Some(ref back) = node.back {
                stack.push(back.as_ref());
            }
        }

        result
    }

    /// Returns the number of polygons in this tree.
    pub fn polygon_count(&self) -> usize {
        let mut count = 0;
        let mut stack: Vec<&BspNode> = vec![self];

        while let Some(node) = stack.pop() {
            count += node.polygons.len();

            if let Some(ref front) = node.front {
                stack.push(front.as_ref());
            }
            if let Some(ref back) = node.back {
                stack.push(back.as_ref());
            }
        }

        count
    }
}

impl Drop for BspNode {
    fn drop(&mut self) {
        // Iterative drop to avoid stack overflow on deep trees
        let mut stack = Vec::new();

        if let Some(front) = self.front.take() {
            stack.push(front);
        }
        if let Some(back) = self.back.take() {
            stack.push(back);
        }

        while let Some(mut node) = stack.pop() {
            // Move children to stack before node is dropped so the
            // automatic drop of `node` cannot recurse
            if let Some(front) = node.front.take() {
                stack.push(front);
            }
            if let Some(back) = node.back.take() {
                stack.push(back);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    fn make_triangle_polygon(z: f64) -> Polygon {
        Polygon::from_vertices(vec![
            DVec3::new(0.0, 0.0, z),
            DVec3::new(1.0, 0.0, z),
            DVec3::new(0.0, 1.0, z),
        ])
        .unwrap()
    }

    #[test]
    fn test_bsp_new_empty() {
        let tree = BspNode::new(vec![]);
        assert_eq!(tree.polygon_count(), 0);
    }

    #[test]
    fn test_bsp_new_multiple() {
        let polys = vec![
            make_triangle_polygon(0.0),
            make_triangle_polygon(1.0),
            make_triangle_polygon(-1.0),
        ];
        let tree = BspNode::new(polys);
        assert_eq!(tree.polygon_count(), 3);
    }

    #[test]
    fn test_bsp_all_polygons() {
        let polys = vec![make_triangle_polygon(0.0), make_triangle_polygon(1.0)];
        let tree = BspNode::new(polys);
        assert_eq!(tree.all_polygons().len(), 2);
    }

    #[test]
    fn test_bsp_invert_flips_normals() {
        let poly = make_triangle_polygon(0.0);
        let original_normal = poly.plane().normal();

        let mut tree = BspNode::new(vec![poly]);
        tree.invert();

        let inverted_normal = tree.polygons[0].plane().normal();
        assert!((original_normal + inverted_normal).length() < 0.001);
    }

    #[test]
    fn test_bsp_clip_polygons_front_survives() {
        let tree = BspNode::new(vec![make_triangle_polygon(0.0)]);
        let result = tree.clip_polygons(vec![make_triangle_polygon(1.0)]);
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_bsp_clip_polygons_back_discarded() {
        let tree = BspNode::new(vec![make_triangle_polygon(0.0)]);
        let result = tree.clip_polygons(vec![make_triangle_polygon(-1.0)]);
        assert_eq!(result.len(), 0);
    }
}
